//! Fixed catalogue of preset questions, rendered as `/` commands in the REPL.

#[derive(Debug, Clone, Copy)]
pub struct QuickAction {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub query: &'static str,
}

pub static CATALOGUE: [QuickAction; 8] = [
    QuickAction {
        id: "schedules",
        label: "Class Schedules",
        icon: "calendar",
        query: "Show me my class schedule for today",
    },
    QuickAction {
        id: "facilities",
        label: "Campus Map",
        icon: "map-pin",
        query: "Where is the library located?",
    },
    QuickAction {
        id: "dining",
        label: "Dining Hours",
        icon: "utensils",
        query: "What are the dining hall hours today?",
    },
    QuickAction {
        id: "library",
        label: "Library Services",
        icon: "book-open",
        query: "What library services are available?",
    },
    QuickAction {
        id: "admin",
        label: "Registration",
        icon: "file-text",
        query: "How do I register for classes?",
    },
    QuickAction {
        id: "hours",
        label: "Office Hours",
        icon: "clock",
        query: "What are the registrar office hours?",
    },
    QuickAction {
        id: "events",
        label: "Campus Events",
        icon: "users",
        query: "What events are happening this week?",
    },
    QuickAction {
        id: "academic",
        label: "Academic Support",
        icon: "graduation-cap",
        query: "Where can I get tutoring help?",
    },
];

pub fn find(id: &str) -> Option<&'static QuickAction> {
    CATALOGUE.iter().find(|action| action.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responder::{self, Category};

    #[test]
    fn test_catalogue_order_is_fixed() {
        let ids: Vec<&str> = CATALOGUE.iter().map(|action| action.id).collect();
        assert_eq!(
            ids,
            [
                "schedules",
                "facilities",
                "dining",
                "library",
                "admin",
                "hours",
                "events",
                "academic"
            ]
        );
    }

    #[test]
    fn test_find_known_and_unknown_ids() {
        let action = find("dining").unwrap();
        assert_eq!(action.label, "Dining Hours");
        assert_eq!(action.icon, "utensils");
        assert!(find("parking").is_none());
    }

    #[test]
    fn test_preset_queries_resolve_by_priority() {
        // Note the preserved substring quirks: the Campus Map preset mentions
        // the library, the Registration preset contains "classes", and the
        // Academic Support preset starts with "Where".
        let expected = [
            ("schedules", Category::Schedule),
            ("facilities", Category::Library),
            ("dining", Category::Dining),
            ("library", Category::Library),
            ("admin", Category::Schedule),
            ("hours", Category::OfficeHours),
            ("events", Category::Events),
            ("academic", Category::CampusMap),
        ];
        for (id, category) in expected {
            let action = find(id).unwrap();
            assert_eq!(
                responder::categorize(action.query),
                Some(category),
                "preset {id:?}"
            );
        }
    }
}
