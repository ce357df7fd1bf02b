//! Categorical enums for leads, deals, activities and call notes.
//!
//! Each enum serializes to the lowercase label used on the wire and can be
//! parsed back from that label with `from_str_value`.

/// Declare a `Copy` enum with snake_case wire labels, `ALL`, `as_str`,
/// `from_str_value` and `Display`.
#[macro_export]
macro_rules! define_label_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The wire label of this variant.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }

            /// Parse a wire label.
            pub fn from_str_value(s: &str) -> Result<Self, String> {
                match s {
                    $( $label => Ok($name::$variant), )+
                    _ => Err(format!(
                        "Invalid {} '{s}'. Must be one of: {}",
                        stringify!($name),
                        [$($label),+].join(", ")
                    )),
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

define_label_enum! {
    /// Sales priority assigned to a lead.
    Priority {
        Low = "low",
        Medium = "medium",
        High = "high",
    }
}

define_label_enum! {
    /// Qualification status of a lead.
    LeadStatus {
        New = "new",
        Qualified = "qualified",
        Contacted = "contacted",
        Nurturing = "nurturing",
        Lost = "lost",
    }
}

define_label_enum! {
    /// Pipeline stage of a deal, in progression order.
    DealStage {
        Qualified = "qualified",
        Proposal = "proposal",
        Negotiation = "negotiation",
        Closing = "closing",
        Won = "won",
        Lost = "lost",
    }
}

define_label_enum! {
    /// Kind of logged interaction.
    ActivityType {
        Call = "call",
        Email = "email",
        Meeting = "meeting",
        Note = "note",
    }
}

define_label_enum! {
    /// Overall tone of a recorded call.
    Sentiment {
        Positive = "positive",
        Neutral = "neutral",
        Negative = "negative",
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

impl Default for LeadStatus {
    fn default() -> Self {
        Self::New
    }
}

/// Stages that make up the active pipeline, in display order.
pub const ACTIVE_PIPELINE_STAGES: [DealStage; 4] = [
    DealStage::Qualified,
    DealStage::Proposal,
    DealStage::Negotiation,
    DealStage::Closing,
];

impl DealStage {
    /// Whether the deal has left the pipeline (won or lost).
    pub fn is_closed(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_defaults_to_medium() {
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn lead_status_defaults_to_new() {
        assert_eq!(LeadStatus::default(), LeadStatus::New);
    }

    #[test]
    fn deal_stage_serializes_lowercase() {
        let json = serde_json::to_string(&DealStage::Negotiation).unwrap();
        assert_eq!(json, "\"negotiation\"");
    }

    #[test]
    fn from_str_value_accepts_every_label() {
        for stage in DealStage::ALL {
            assert_eq!(DealStage::from_str_value(stage.as_str()), Ok(*stage));
        }
    }

    #[test]
    fn from_str_value_rejects_unknown_label() {
        let err = LeadStatus::from_str_value("archived").unwrap_err();
        assert!(err.contains("archived"));
        assert!(err.contains("nurturing"));
    }

    #[test]
    fn from_str_value_is_case_sensitive() {
        assert!(Sentiment::from_str_value("Positive").is_err());
    }

    #[test]
    fn active_pipeline_excludes_closed_stages() {
        assert!(ACTIVE_PIPELINE_STAGES.iter().all(|s| !s.is_closed()));
        assert!(DealStage::Won.is_closed());
        assert!(DealStage::Lost.is_closed());
    }

    #[test]
    fn display_matches_label() {
        assert_eq!(ActivityType::Meeting.to_string(), "meeting");
    }
}
