//! Built-in area vocabulary and text folding.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Case- and diacritic-insensitive form: NFD, combining marks dropped,
/// lower-cased.
pub fn fold(text: &str) -> String {
    text.trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinArea {
    pub id: &'static str,
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

pub const BUILTIN_AREAS: &[BuiltinArea] = &[
    BuiltinArea {
        id: "auth",
        name: "Authentication",
        aliases: &[
            "authentication",
            "login",
            "logout",
            "signin",
            "sign-in",
            "signup",
            "sign-up",
            "register",
            "session",
            "sessions",
            "autenticación",
            "anmeldung",
        ],
    },
    BuiltinArea {
        id: "billing",
        name: "Billing",
        aliases: &[
            "payment",
            "payments",
            "checkout",
            "subscription",
            "subscriptions",
            "invoice",
            "invoices",
            "pricing",
            "facturación",
            "pagos",
        ],
    },
    BuiltinArea {
        id: "dashboard",
        name: "Dashboard",
        aliases: &["overview", "panel", "tableau-de-bord"],
    },
    BuiltinArea {
        id: "settings",
        name: "Settings",
        aliases: &["preferences", "configuración", "paramètres", "einstellungen"],
    },
    BuiltinArea {
        id: "profile",
        name: "User profile",
        aliases: &["profiles", "account", "accounts", "perfil"],
    },
    BuiltinArea {
        id: "admin",
        name: "Administration",
        aliases: &["administration", "backoffice", "back-office", "administración"],
    },
    BuiltinArea {
        id: "notifications",
        name: "Notifications",
        aliases: &["notification", "alerts", "inbox", "notificaciones"],
    },
    BuiltinArea {
        id: "search",
        name: "Search",
        aliases: &["búsqueda", "recherche"],
    },
    BuiltinArea {
        id: "onboarding",
        name: "Onboarding",
        aliases: &["welcome", "getting-started", "setup-wizard"],
    },
    BuiltinArea {
        id: "analytics",
        name: "Analytics",
        aliases: &["metrics", "reports", "reporting", "stats", "estadísticas"],
    },
    BuiltinArea {
        id: "messaging",
        name: "Messaging",
        aliases: &["messages", "chat", "conversations", "mensajes"],
    },
];

/// Match `input` against built-in ids, friendly names and aliases.
pub fn lookup_builtin(input: &str) -> Option<&'static BuiltinArea> {
    let folded = fold(input);
    if folded.is_empty() {
        return None;
    }
    BUILTIN_AREAS.iter().find(|area| {
        fold(area.id) == folded
            || fold(area.name) == folded
            || area.aliases.iter().any(|alias| fold(alias) == folded)
    })
}

pub fn builtin_by_id(id: &str) -> Option<&'static BuiltinArea> {
    BUILTIN_AREAS.iter().find(|area| area.id == id)
}
