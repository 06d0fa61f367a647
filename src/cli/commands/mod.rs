use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ColorChoice, Command,
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("pordego")
        .about("Authentication and session token service")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("PORDEGO_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("users")
                .short('u')
                .long("users")
                .help("Path to the JSON user seed file")
                .env("PORDEGO_USERS")
                .required(true),
        )
        .arg(
            Arg::new("secret")
                .short('s')
                .long("secret")
                .help("Token signing secret (HMAC-SHA256)")
                .env("PORDEGO_SECRET")
                .required(true),
        )
        .arg(
            Arg::new("issuer")
                .long("issuer")
                .help("Issuer claim stamped into and required from every token")
                .default_value("pordego")
                .env("PORDEGO_ISSUER"),
        )
        .arg(
            Arg::new("token-lifetime")
                .long("token-lifetime")
                .help("Token lifetime in milliseconds")
                .default_value("3600000")
                .env("PORDEGO_TOKEN_LIFETIME")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("PORDEGO_LOG_LEVEL")
                .global(true)
                .action(clap::ArgAction::Count)
                .value_parser(validator_log_level()),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "pordego");
        assert_eq!(
            command.get_about().unwrap().to_string(),
            "Authentication and session token service"
        );
        assert_eq!(
            command.get_version().unwrap().to_string(),
            env!("CARGO_PKG_VERSION")
        );
    }

    #[test]
    fn test_check_required_args() {
        let command = new();
        let matches = command.get_matches_from(vec![
            "pordego",
            "--port",
            "8080",
            "--users",
            "/etc/pordego/users.json",
            "--secret",
            "sikreta",
            "--issuer",
            "pordego-test",
            "--token-lifetime",
            "60000",
        ]);

        assert_eq!(matches.get_one::<u16>("port").map(|s| *s), Some(8080));
        assert_eq!(
            matches.get_one::<String>("users").map(|s| s.to_string()),
            Some("/etc/pordego/users.json".to_string())
        );
        assert_eq!(
            matches.get_one::<String>("secret").map(|s| s.to_string()),
            Some("sikreta".to_string())
        );
        assert_eq!(
            matches.get_one::<String>("issuer").map(|s| s.to_string()),
            Some("pordego-test".to_string())
        );
        assert_eq!(
            matches.get_one::<u64>("token-lifetime").map(|s| *s),
            Some(60_000)
        );
    }

    #[test]
    fn test_check_defaults() {
        let command = new();
        let matches = command.get_matches_from(vec![
            "pordego",
            "--users",
            "users.json",
            "--secret",
            "sikreta",
        ]);

        assert_eq!(matches.get_one::<u16>("port").map(|s| *s), Some(8080));
        assert_eq!(
            matches.get_one::<String>("issuer").map(|s| s.to_string()),
            Some("pordego".to_string())
        );
        assert_eq!(
            matches.get_one::<u64>("token-lifetime").map(|s| *s),
            Some(3_600_000)
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("PORDEGO_PORT", Some("443")),
                ("PORDEGO_USERS", Some("/srv/users.json")),
                ("PORDEGO_SECRET", Some("sikreta")),
                ("PORDEGO_ISSUER", Some("gatekeeper")),
                ("PORDEGO_TOKEN_LIFETIME", Some("120000")),
                ("PORDEGO_LOG_LEVEL", Some("info")),
            ],
            || {
                let command = new();
                let matches = command.get_matches_from(vec!["pordego"]);

                assert_eq!(matches.get_one::<u16>("port").map(|s| *s), Some(443));
                assert_eq!(
                    matches.get_one::<String>("users").map(|s| s.to_string()),
                    Some("/srv/users.json".to_string())
                );
                assert_eq!(
                    matches.get_one::<String>("issuer").map(|s| s.to_string()),
                    Some("gatekeeper".to_string())
                );
                assert_eq!(
                    matches.get_one::<u64>("token-lifetime").map(|s| *s),
                    Some(120_000)
                );
                assert_eq!(matches.get_one::<u8>("verbosity").map(|s| *s), Some(2));
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        // loop cover all possible value_parse
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars(
                [
                    ("PORDEGO_LOG_LEVEL", Some(level)),
                    ("PORDEGO_USERS", Some("users.json")),
                    ("PORDEGO_SECRET", Some("sikreta")),
                ],
                || {
                    let command = new();
                    let matches = command.get_matches_from(vec!["pordego"]);
                    assert_eq!(
                        matches.get_one::<u8>("verbosity").map(|s| *s),
                        Some(index as u8)
                    );
                },
            );
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, _) in levels.iter().enumerate() {
            temp_env::with_vars([("PORDEGO_LOG_LEVEL", None::<String>)], || {
                let mut args = vec![
                    "pordego".to_string(),
                    "--users".to_string(),
                    "users.json".to_string(),
                    "--secret".to_string(),
                    "sikreta".to_string(),
                ];

                // Add the appropriate number of "-v" flags based on the index
                if index > 0 {
                    let v = format!("-{}", "v".repeat(index));
                    args.push(v);
                }

                let command = new();
                let matches = command.get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>("verbosity").map(|s| *s),
                    Some(index as u8)
                );
            });
        }
    }
}
