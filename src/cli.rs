use clap::Parser;

/// juggler — export JIRA issues as a TaskJuggler task file
#[derive(Parser, Debug, Clone)]
#[command(name = "juggler", version, about)]
pub struct Cli {
    /// JIRA base URL (e.g. https://jira.example.com)
    #[arg(long)]
    pub url: Option<String>,

    /// JIRA username
    #[arg(long)]
    pub user: Option<String>,

    /// JQL query selecting the issues to export
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// Output file for the generated task blocks
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// Path to config file
    #[arg(long)]
    pub config: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, short = 'l')]
    pub loglevel: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_no_args() {
        let cli = Cli::parse_from(["juggler"]);
        assert!(cli.url.is_none());
        assert!(cli.query.is_none());
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::parse_from([
            "juggler",
            "--url",
            "https://jira.example.com",
            "--user",
            "justme",
            "--query",
            "project = ABC",
            "--output",
            "out.tjp",
            "--config",
            "juggler.toml",
            "--loglevel",
            "debug",
        ]);
        assert_eq!(cli.url.as_deref(), Some("https://jira.example.com"));
        assert_eq!(cli.user.as_deref(), Some("justme"));
        assert_eq!(cli.query.as_deref(), Some("project = ABC"));
        assert_eq!(cli.output.as_deref(), Some("out.tjp"));
        assert_eq!(cli.config.as_deref(), Some("juggler.toml"));
        assert_eq!(cli.loglevel.as_deref(), Some("debug"));
    }

    #[test]
    fn test_parse_short_flags() {
        let cli = Cli::parse_from(["juggler", "-q", "assignee = me", "-o", "plan.tjp"]);
        assert_eq!(cli.query.as_deref(), Some("assignee = me"));
        assert_eq!(cli.output.as_deref(), Some("plan.tjp"));
    }
}
