//! Domain classification - which routing scope owns an inbound event.
//!
//! Classification is pure computation over immutable tables built once at
//! startup. Callback identifiers are matched against an ordered prefix
//! table (curated so specific prefixes precede generic ones); messages fall
//! through command, state-prefix, media, and keyword rules to a terminal
//! default, so a message is always classified somewhere.

use once_cell::sync::Lazy;
use std::fmt;

use super::event::MessageEvent;

/// The named routing scopes of the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BotDomain {
    Auth,
    Payments,
    Generation,
    User,
    Admin,
    Broadcast,
}

impl BotDomain {
    /// Returns all domains.
    pub fn all() -> &'static [BotDomain] {
        &[
            BotDomain::Auth,
            BotDomain::Payments,
            BotDomain::Generation,
            BotDomain::User,
            BotDomain::Admin,
            BotDomain::Broadcast,
        ]
    }
}

impl fmt::Display for BotDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BotDomain::Auth => "auth",
            BotDomain::Payments => "payments",
            BotDomain::Generation => "generation",
            BotDomain::User => "user",
            BotDomain::Admin => "admin",
            BotDomain::Broadcast => "broadcast",
        };
        write!(f, "{}", s)
    }
}

/// Immutable classification tables, constructed during initialization and
/// injected into the registry.
#[derive(Debug, Clone)]
pub struct ClassificationRules {
    /// Ordered (prefix, domain) pairs; first `starts_with` match wins.
    callback_prefixes: Vec<(String, BotDomain)>,
    /// Exact command-name lookup.
    commands: Vec<(String, BotDomain)>,
    /// (prefix, domain) pairs matched longest-prefix-first against the
    /// current state name.
    state_prefixes: Vec<(String, BotDomain)>,
    /// Curated substrings matched against lowercased message text.
    keywords: Vec<(String, BotDomain)>,
}

impl ClassificationRules {
    /// Builds rules from explicit tables. Callback-prefix order is
    /// significant and must be curated so more specific prefixes precede
    /// generic ones.
    pub fn new(
        callback_prefixes: Vec<(&str, BotDomain)>,
        commands: Vec<(&str, BotDomain)>,
        state_prefixes: Vec<(&str, BotDomain)>,
        keywords: Vec<(&str, BotDomain)>,
    ) -> Self {
        let own = |v: Vec<(&str, BotDomain)>| {
            v.into_iter()
                .map(|(s, d)| (s.to_string(), d))
                .collect::<Vec<_>>()
        };
        Self {
            callback_prefixes: own(callback_prefixes),
            commands: own(commands),
            state_prefixes: own(state_prefixes),
            keywords: own(keywords),
        }
    }

    /// The curated table set shipped with the bot.
    pub fn standard() -> &'static ClassificationRules {
        static STANDARD: Lazy<ClassificationRules> = Lazy::new(|| {
            ClassificationRules::new(
                vec![
                    ("admin_", BotDomain::Admin),
                    ("broadcast_", BotDomain::Broadcast),
                    ("tariff_", BotDomain::Payments),
                    ("pay_", BotDomain::Payments),
                    ("style_", BotDomain::Generation),
                    ("generate_", BotDomain::Generation),
                    ("avatar_", BotDomain::Generation),
                    ("profile_", BotDomain::User),
                    ("settings_", BotDomain::User),
                    ("menu_", BotDomain::Auth),
                ],
                vec![
                    ("start", BotDomain::Auth),
                    ("cancel", BotDomain::Auth),
                    ("help", BotDomain::Auth),
                    ("profile", BotDomain::User),
                    ("broadcast", BotDomain::Broadcast),
                    ("stats", BotDomain::Admin),
                ],
                vec![
                    ("awaiting_photos", BotDomain::Generation),
                    ("generation_", BotDomain::Generation),
                    ("awaiting_email", BotDomain::User),
                    ("awaiting_payment", BotDomain::Payments),
                    ("broadcast_", BotDomain::Broadcast),
                ],
                vec![
                    ("tariff", BotDomain::Payments),
                    ("price", BotDomain::Payments),
                    ("payment", BotDomain::Payments),
                    ("style", BotDomain::Generation),
                    ("avatar", BotDomain::Generation),
                    ("help", BotDomain::Auth),
                ],
            )
        });
        &STANDARD
    }

    /// Classifies a callback by its raw identifier. Pure; `None` means no
    /// domain claims the identifier.
    pub fn classify_callback(&self, raw_identifier: &str) -> Option<BotDomain> {
        self.callback_prefixes
            .iter()
            .find(|(prefix, _)| raw_identifier.starts_with(prefix.as_str()))
            .map(|(_, domain)| *domain)
    }

    /// Classifies a message given the current state name. Pure; always
    /// produces a domain, falling back to `Auth`.
    pub fn classify_message(
        &self,
        event: &MessageEvent,
        current_state: Option<&str>,
    ) -> BotDomain {
        // 1. Explicit command.
        if let Some(command) = event.command.as_deref() {
            if let Some(domain) = self.lookup_command(command) {
                return domain;
            }
        }

        // 2. Longest state-name prefix.
        if let Some(state) = current_state {
            if let Some(domain) = self.match_state_prefix(state) {
                return domain;
            }
        }

        // 3. Media content routes to generation.
        if event.is_media() {
            return BotDomain::Generation;
        }

        // 4. Keyword heuristics over the text.
        if let Some(text) = event.text.as_deref() {
            let lowered = text.to_lowercase();
            for (keyword, domain) in &self.keywords {
                if lowered.contains(keyword.as_str()) {
                    return *domain;
                }
            }
        }

        // 5. Terminal fallback.
        BotDomain::Auth
    }

    fn lookup_command(&self, command: &str) -> Option<BotDomain> {
        self.commands
            .iter()
            .find(|(name, _)| name == command)
            .map(|(_, domain)| *domain)
    }

    fn match_state_prefix(&self, state: &str) -> Option<BotDomain> {
        self.state_prefixes
            .iter()
            .filter(|(prefix, _)| state.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, domain)| *domain)
    }
}
