//! Canned keyword responder: a fixed, priority-ordered rule table.

/// Seeded bot message shown when a conversation starts.
pub const GREETING: &str = "Hi! I'm your Campus AI Assistant. I can help you with class schedules, \
    campus facilities, dining information, library services, and administrative procedures. \
    What would you like to know?";

const FALLBACK: &str = "I'd be happy to help you with campus information! I can assist with:\n\n\
    • Class schedules and academic calendar\n\
    • Campus facilities and locations\n\
    • Dining services and hours\n\
    • Library services and resources\n\
    • Administrative procedures\n\
    • Campus events and activities\n\n\
    What specific information would you like to know?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Schedule,
    Library,
    Dining,
    CampusMap,
    Registration,
    OfficeHours,
    Events,
    AcademicSupport,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Schedule => "schedule",
            Category::Library => "library",
            Category::Dining => "dining",
            Category::CampusMap => "campus-map",
            Category::Registration => "registration",
            Category::OfficeHours => "office-hours",
            Category::Events => "events",
            Category::AcademicSupport => "academic-support",
        }
    }
}

pub struct Rule {
    pub category: Category,
    pub triggers: &'static [&'static str],
    pub reply: &'static str,
}

impl Rule {
    fn matches(&self, normalized: &str) -> bool {
        self.triggers.iter().any(|trigger| normalized.contains(trigger))
    }
}

/// Evaluated top to bottom; the first matching rule wins.
pub static RULES: [Rule; 8] = [
    Rule {
        category: Category::Schedule,
        triggers: &["schedule", "class"],
        reply: "Your classes today:\n\n\
            • 9:00 AM - Computer Science 101 (Room A205)\n\
            • 11:00 AM - Mathematics 201 (Room B150)\n\
            • 2:00 PM - English Literature (Room C305)\n\
            • 4:00 PM - Physics Lab (Lab Building 2)",
    },
    Rule {
        category: Category::Library,
        triggers: &["library"],
        reply: "📚 Library Services:\n\n\
            • Study rooms available (reserve online)\n\
            • Computer lab on 2nd floor\n\
            • Research assistance desk\n\
            • Printing services\n\
            • Hours: 7 AM - 11 PM (Mon-Thu), 7 AM - 9 PM (Fri-Sat), 9 AM - 11 PM (Sun)",
    },
    Rule {
        category: Category::Dining,
        triggers: &["dining", "food"],
        reply: "🍽️ Dining Information:\n\n\
            Main Dining Hall:\n\
            • Breakfast: 7:00 AM - 10:00 AM\n\
            • Lunch: 11:30 AM - 2:30 PM\n\
            • Dinner: 5:00 PM - 8:00 PM\n\n\
            Café Central:\n\
            • Open: 7:00 AM - 10:00 PM\n\
            • Coffee, snacks, and light meals\n\n\
            Food trucks on campus quad 11 AM - 3 PM",
    },
    Rule {
        category: Category::CampusMap,
        triggers: &["map", "location", "where"],
        reply: "🗺️ Campus Navigation:\n\n\
            • Library: Central Campus, Building A\n\
            • Student Services: Administration Building\n\
            • Dining Hall: Campus Center\n\
            • Gym/Recreation: Athletic Complex\n\
            • Parking: Lots A-E around campus perimeter\n\n\
            Use our mobile app for interactive maps and directions!",
    },
    Rule {
        category: Category::Registration,
        triggers: &["register", "registration"],
        reply: "📝 Registration Information:\n\n\
            • Registration opens: November 15th\n\
            • Meet with your advisor first\n\
            • Use the student portal to register\n\
            • Add/drop deadline: First week of semester\n\
            • Need help? Visit Student Services (Admin Bldg, Room 101)",
    },
    Rule {
        category: Category::OfficeHours,
        triggers: &["office hours", "hours"],
        reply: "🕐 Office Hours:\n\n\
            Registrar: Mon-Fri 8 AM - 5 PM\n\
            Student Services: Mon-Fri 9 AM - 6 PM\n\
            Financial Aid: Mon-Fri 9 AM - 4 PM\n\
            Counseling: Mon-Fri 8 AM - 5 PM (appointments recommended)\n\
            IT Help Desk: Mon-Sun 24/7 (online), Mon-Fri 9 AM - 5 PM (in-person)",
    },
    Rule {
        category: Category::Events,
        triggers: &["event", "happening"],
        reply: "🎉 This Week's Events:\n\n\
            • Monday: Career Fair (Student Center, 10 AM - 4 PM)\n\
            • Wednesday: Guest Lecture Series (Auditorium, 7 PM)\n\
            • Friday: Movie Night (Quad, 8 PM)\n\
            • Saturday: Football Game vs. State University (Stadium, 2 PM)\n\
            • Sunday: Study Group Sessions (Library, 6 PM)",
    },
    Rule {
        category: Category::AcademicSupport,
        triggers: &["tutor", "academic support"],
        reply: "📖 Academic Support:\n\n\
            • Tutoring Center (Library 3rd floor)\n\
            • Free tutoring for math, science, writing\n\
            • Hours: Mon-Thu 9 AM - 9 PM, Fri 9 AM - 5 PM\n\
            • Peer tutoring available\n\
            • Study groups organized weekly\n\
            • Writing center for essay help\n\n\
            Schedule appointments online or walk-in!",
    },
];

fn matching_rule(normalized: &str) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.matches(normalized))
}

/// Canned reply for a query. Total and deterministic: unmatched queries get
/// the fallback text. Matching is plain substring containment on the
/// lowercased query, so "classified" matches "class".
pub fn respond(query: &str) -> &'static str {
    match matching_rule(&query.to_lowercase()) {
        Some(rule) => rule.reply,
        None => FALLBACK,
    }
}

/// Category the query would resolve to, if any.
pub fn categorize(query: &str) -> Option<Category> {
    matching_rule(&query.to_lowercase()).map(|rule| rule.category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_outranks_every_other_trigger() {
        assert_eq!(respond("class at the library"), RULES[0].reply);
        assert_eq!(respond("food near my class"), RULES[0].reply);
        assert_eq!(categorize("class at the library"), Some(Category::Schedule));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(respond("LIBRARY"), RULES[1].reply);
        assert_eq!(respond("Show Me My Class SCHEDULE"), RULES[0].reply);
    }

    #[test]
    fn test_unmatched_query_gets_exact_fallback() {
        assert_eq!(respond("what is the meaning of life"), FALLBACK);
        assert_eq!(categorize("what is the meaning of life"), None);
    }

    #[test]
    fn test_respond_is_deterministic() {
        let first = respond("any food trucks today?");
        let second = respond("any food trucks today?");
        assert_eq!(first, second);
        assert_eq!(first, RULES[2].reply);
    }

    #[test]
    fn test_substring_match_has_no_word_boundary() {
        // "classified" contains "class"; matching is containment only.
        assert_eq!(respond("classified documents"), RULES[0].reply);
        assert_eq!(categorize("whereabouts"), Some(Category::CampusMap));
    }

    #[test]
    fn test_every_trigger_reaches_its_own_rule() {
        for rule in &RULES {
            for trigger in rule.triggers {
                assert_eq!(respond(trigger), rule.reply, "trigger {trigger:?}");
            }
        }
    }

    #[test]
    fn test_office_hours_requires_no_earlier_match() {
        assert_eq!(categorize("registrar hours"), Some(Category::OfficeHours));
        // "dining" outranks "hours".
        assert_eq!(categorize("dining hall hours"), Some(Category::Dining));
    }

    #[test]
    fn test_reply_texts_are_multi_line() {
        for rule in &RULES {
            assert!(rule.reply.contains('\n'), "{} reply", rule.category.as_str());
        }
        assert!(FALLBACK.contains('\n'));
    }
}
