use crate::types::config::ProfileConfig;
use crate::types::scoring::TypeCode;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub name: String,
    pub description: String,
}

const BUILTIN: [(&str, &str, &str); 16] = [
    (
        "INTJ",
        "Architect",
        "Strategic and highly independent. Holds a long-range vision and reaches goals efficiently, \
         thinks logically and keeps deepening their knowledge.",
    ),
    (
        "INTP",
        "Logician",
        "Curious about theories and abstract ideas. Analyses problems with flexible thinking, finds \
         original solutions and values objective reasoning.",
    ),
    (
        "ENTJ",
        "Commander",
        "Decisive and a natural leader. Holds a clear vision, organises people efficiently and acts \
         strategically toward the goal.",
    ),
    (
        "ENTP",
        "Debater",
        "Enjoys intellectual debate and new ideas. Creative and inventive, explores possibilities and \
         attacks problems from unexpected angles.",
    ),
    (
        "INFJ",
        "Advocate",
        "Idealistic and thoughtful. Deeply empathetic, encourages and guides others, and acts on \
         strong convictions while staying introspective.",
    ),
    (
        "INFP",
        "Mediator",
        "Idealistic and creative. Guards their own values, seeks harmony, believes in the potential \
         of others and enjoys supporting them.",
    ),
    (
        "ENFJ",
        "Protagonist",
        "Charismatic and supportive. Helps others grow, builds harmonious communities and puts \
         passion into encouraging people.",
    ),
    (
        "ENFP",
        "Campaigner",
        "Enthusiastic and imaginative. Explores new possibilities, treasures connections with people \
         and lifts the mood around them.",
    ),
    (
        "ISTJ",
        "Logistician",
        "Responsible and dependable. Respects tradition and order, plans carefully and reaches goals \
         steadily.",
    ),
    (
        "ISFJ",
        "Defender",
        "Devoted and caring. Sensitive to the needs of others, finds joy in supporting them and \
         values a harmonious environment.",
    ),
    (
        "ESTJ",
        "Executive",
        "Practical and organised. Values clear rules and order, manages work efficiently and leads \
         with a strong sense of responsibility.",
    ),
    (
        "ESFJ",
        "Consul",
        "Sociable and cooperative. Puts harmony with others first, contributes to the community and \
         enjoys meeting people's needs.",
    ),
    (
        "ISTP",
        "Virtuoso",
        "Practical and analytical. Prefers solving problems hands-on, adapts quickly and judges \
         situations calmly.",
    ),
    (
        "ISFP",
        "Adventurer",
        "Artistic and flexible. Has a keen aesthetic sense, enjoys the present and lives true to \
         their values while staying modest.",
    ),
    (
        "ESTP",
        "Entrepreneur",
        "Energetic and realistic. Not afraid of risk, decides and acts fast, and seeks stimulating \
         experiences.",
    ),
    (
        "ESFP",
        "Entertainer",
        "Cheerful and outgoing. Good at entertaining people, enjoys the moment and spreads positive \
         energy.",
    ),
];

/// Type descriptions: the built-in table with configured overrides on top.
#[derive(Debug, Clone, Default)]
pub struct ProfileTable {
    overrides: BTreeMap<String, Profile>,
}

impl ProfileTable {
    pub fn with_overrides(overrides: &BTreeMap<String, ProfileConfig>) -> Self {
        Self {
            overrides: overrides
                .iter()
                .map(|(code, profile)| {
                    (
                        code.to_ascii_uppercase(),
                        Profile {
                            name: profile.name.clone(),
                            description: profile.description.clone(),
                        },
                    )
                })
                .collect(),
        }
    }

    pub fn describe(&self, code: &TypeCode) -> Profile {
        let key = code.to_string();
        if let Some(profile) = self.overrides.get(&key) {
            return profile.clone();
        }
        BUILTIN
            .iter()
            .find(|(builtin, _, _)| *builtin == key)
            .map(|(_, name, description)| Profile {
                name: (*name).to_string(),
                description: description.split_whitespace().collect::<Vec<_>>().join(" "),
            })
            .unwrap_or_else(undefined)
    }
}

fn undefined() -> Profile {
    Profile {
        name: "Undefined".to_string(),
        description: "No description is available for this type yet.".to_string(),
    }
}
