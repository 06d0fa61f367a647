use crate::cli::{actions::Action, globals::GlobalArgs};
use anyhow::Result;
use secrecy::SecretString;

pub fn handler(matches: &clap::ArgMatches) -> Result<(Action, GlobalArgs)> {
    let action = Action::Server {
        port: matches.get_one::<u16>("port").copied().unwrap_or(8080),
        users: matches
            .get_one("users")
            .map(|s: &String| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --users"))?,
    };

    let secret = matches
        .get_one("secret")
        .map(|s: &String| SecretString::from(s.to_string()))
        .ok_or_else(|| anyhow::anyhow!("missing required argument: --secret"))?;

    let issuer = matches
        .get_one("issuer")
        .map_or_else(|| "pordego".to_string(), |s: &String| s.to_string());

    let token_lifetime_ms = matches
        .get_one::<u64>("token-lifetime")
        .copied()
        .unwrap_or(3_600_000);

    Ok((action, GlobalArgs::new(secret, issuer, token_lifetime_ms)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;
    use secrecy::ExposeSecret;

    #[test]
    fn handler_builds_action_and_globals() -> Result<()> {
        let matches = commands::new().get_matches_from(vec![
            "pordego",
            "--port",
            "9090",
            "--users",
            "users.json",
            "--secret",
            "sikreta",
            "--issuer",
            "gatekeeper",
            "--token-lifetime",
            "1000",
        ]);

        let (action, globals) = handler(&matches)?;

        let Action::Server { port, users } = action;
        assert_eq!(port, 9090);
        assert_eq!(users, "users.json");
        assert_eq!(globals.secret.expose_secret(), "sikreta");
        assert_eq!(globals.issuer, "gatekeeper");
        assert_eq!(globals.token_lifetime_ms, 1000);
        Ok(())
    }
}
