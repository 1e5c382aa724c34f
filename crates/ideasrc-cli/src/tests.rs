use super::*;

#[test]
fn parses_db_migrate_command() {
    let cli = Cli::try_parse_from(["ideasrc-cli", "db", "migrate", "--platform", "reddit"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Db {
            command: DbCommands::Migrate {
                platform: Platform::Reddit
            }
        }
    ));
}

#[test]
fn parses_db_ping_with_platform_alias() {
    let cli = Cli::try_parse_from(["ideasrc-cli", "db", "ping", "--platform", "hn"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Db {
            command: DbCommands::Ping {
                platform: Platform::HackerNews
            }
        }
    ));
}

#[test]
fn missing_command_is_rejected() {
    assert!(Cli::try_parse_from(["ideasrc-cli"]).is_err());
}

#[test]
fn unknown_platform_is_rejected() {
    let result = Cli::try_parse_from(["ideasrc-cli", "stats", "--platform", "myspace"]);
    assert!(result.is_err());
}

#[test]
fn scrape_hackernews_defaults_to_top_feed() {
    let cli = Cli::try_parse_from(["ideasrc-cli", "scrape", "hackernews"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Scrape {
            command: ScrapeCommands::Hackernews {
                feed: HnFeed::Top,
                limit: None
            }
        }
    ));
}

#[test]
fn scrape_hackernews_with_feed_and_limit() {
    let cli = Cli::try_parse_from([
        "ideasrc-cli",
        "scrape",
        "hackernews",
        "--feed",
        "show",
        "--limit",
        "25",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Scrape {
            command: ScrapeCommands::Hackernews {
                feed: HnFeed::Show,
                limit: Some(25)
            }
        }
    ));
}

#[test]
fn scrape_rejects_unknown_feed() {
    let result = Cli::try_parse_from(["ideasrc-cli", "scrape", "hackernews", "--feed", "jobs"]);
    assert!(result.is_err());
}

#[test]
fn ingest_requires_source_and_file() {
    assert!(Cli::try_parse_from(["ideasrc-cli", "ingest", "--platform", "medium"]).is_err());

    let cli = Cli::try_parse_from([
        "ideasrc-cli",
        "ingest",
        "--platform",
        "medium",
        "--source",
        "medium_trending",
        "--file",
        "records.json",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Ingest {
            platform: Platform::Medium,
            ref source,
            ref file,
        } if source == "medium_trending" && file.as_os_str() == "records.json"
    ));
}

#[test]
fn list_uses_default_limit() {
    let cli = Cli::try_parse_from(["ideasrc-cli", "list", "--platform", "youtube"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::List {
            platform: Platform::Youtube,
            source: None,
            limit: 20,
            order_by: None,
        }
    ));
}

#[test]
fn list_with_source_and_order() {
    let cli = Cli::try_parse_from([
        "ideasrc-cli",
        "list",
        "--platform",
        "tiktok",
        "--source",
        "tiktok_trending",
        "--limit",
        "5",
        "--order-by",
        "created_at",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Commands::List {
            platform: Platform::Tiktok,
            source: Some(ref s),
            limit: 5,
            order_by: Some(ref o),
        } if s == "tiktok_trending" && o == "created_at"
    ));
}

#[test]
fn process_defaults_to_stdout() {
    let cli = Cli::try_parse_from(["ideasrc-cli", "process", "--platform", "spotify_podcasts"])
        .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Process {
            platform: Platform::SpotifyPodcasts,
            limit: 100,
            output: None,
        }
    ));
}

#[test]
fn clear_without_yes_parses_as_unconfirmed() {
    let cli = Cli::try_parse_from(["ideasrc-cli", "clear", "--platform", "kick_clips"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Clear {
            platform: Platform::KickClips,
            yes: false
        }
    ));
}
