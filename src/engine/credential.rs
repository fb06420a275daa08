//! Database credential safety checking

use crate::input::CredentialConfig;
use crate::output::{Verdict, VerdictDetail};

/// Check a username/password pair: password length first, then the username
pub fn check_credentials(
    config: &CredentialConfig,
    min_password_chars: usize,
    reserved_usernames: &[&str],
) -> Verdict {
    // Counted like the JavaScript clients that produce these configs
    if config.password.encode_utf16().count() < min_password_chars {
        return Verdict::deny(
            "credential-short-password",
            "database password is too short",
        )
        .with_suggestion(format!(
            "use a password of at least {} characters combining letters, numbers and symbols",
            min_password_chars
        ));
    }

    if reserved_usernames.contains(&config.username.as_str()) {
        return Verdict::deny(
            "credential-reserved-username",
            format!("insecure database username: {}", config.username),
        )
        .with_suggestion(format!(
            "avoid default usernames such as {}",
            reserved_usernames
                .iter()
                .map(|name| format!("\"{}\"", name))
                .collect::<Vec<_>>()
                .join(" or ")
        ))
        .with_detail(VerdictDetail::Username(config.username.clone()));
    }

    Verdict::safe()
}
