use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, ItemId, UserId};

/// Storage location of an item. Locations are a fixed set of sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Location {
    #[serde(rename = "Section A")]
    SectionA,
    #[serde(rename = "Section B")]
    SectionB,
    #[serde(rename = "Section C")]
    SectionC,
    #[serde(rename = "Section D")]
    SectionD,
    #[default]
    Undefined,
}

impl Location {
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::SectionA => "Section A",
            Location::SectionB => "Section B",
            Location::SectionC => "Section C",
            Location::SectionD => "Section D",
            Location::Undefined => "Undefined",
        }
    }
}

impl core::fmt::Display for Location {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Section A" => Ok(Location::SectionA),
            "Section B" => Ok(Location::SectionB),
            "Section C" => Ok(Location::SectionC),
            "Section D" => Ok(Location::SectionD),
            "Undefined" => Ok(Location::Undefined),
            other => Err(DomainError::validation(format!(
                "location must be one of: Section A, Section B, Section C, Section D, Undefined (got '{other}')"
            ))),
        }
    }
}

/// An inventory item.
///
/// `created_by` is an ownership back-reference set once at creation and never
/// reassigned; `created_at` is server-populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: Option<String>,
    pub quantity: i64,
    pub location: Location,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for creating or updating an item.
///
/// The same validation runs on create and update: an update that drops a
/// required field is rejected rather than defaulted. Optional fields are
/// full-replacement: an update that omits `description` clears it, and one
/// that omits `location` resets it to `Undefined`.
#[derive(Debug, Clone, Default)]
pub struct ItemDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i64>,
    pub location: Option<Location>,
}

impl ItemDraft {
    fn validated(&self) -> DomainResult<(String, i64)> {
        let name = match &self.name {
            Some(n) if !n.trim().is_empty() => n.trim().to_string(),
            _ => return Err(DomainError::validation("name is required")),
        };

        let quantity = match self.quantity {
            Some(q) if q >= 0 => q,
            Some(_) => return Err(DomainError::validation("quantity cannot be negative")),
            None => return Err(DomainError::validation("quantity is required")),
        };

        Ok((name, quantity))
    }
}

impl Item {
    /// Validate a draft and create the item, attributing ownership to
    /// `created_by`.
    pub fn create(draft: ItemDraft, created_by: UserId) -> DomainResult<Self> {
        let (name, quantity) = draft.validated()?;

        Ok(Self {
            id: ItemId::new(),
            name,
            description: draft.description,
            quantity,
            location: draft.location.unwrap_or_default(),
            created_by,
            created_at: Utc::now(),
        })
    }

    /// Re-validate and apply an update, replacing every caller-supplied
    /// field: omitted optionals are cleared, not preserved. Ownership and
    /// creation time are never touched.
    pub fn apply_update(&mut self, draft: ItemDraft) -> DomainResult<()> {
        let (name, quantity) = draft.validated()?;

        self.name = name;
        self.description = draft.description;
        self.quantity = quantity;
        self.location = draft.location.unwrap_or_default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn draft(name: &str, quantity: i64) -> ItemDraft {
        ItemDraft {
            name: Some(name.to_string()),
            quantity: Some(quantity),
            ..Default::default()
        }
    }

    #[test]
    fn create_populates_server_fields() {
        let owner = UserId::new();
        let item = Item::create(draft("Bolt M6", 50), owner).unwrap();

        assert_eq!(item.name, "Bolt M6");
        assert_eq!(item.quantity, 50);
        assert_eq!(item.location, Location::Undefined);
        assert_eq!(item.created_by, owner);
    }

    #[test]
    fn create_requires_name_and_quantity() {
        let owner = UserId::new();

        let missing_name = ItemDraft {
            quantity: Some(1),
            ..Default::default()
        };
        assert!(matches!(
            Item::create(missing_name, owner),
            Err(DomainError::Validation(_))
        ));

        let blank_name = draft("   ", 1);
        assert!(matches!(
            Item::create(blank_name, owner),
            Err(DomainError::Validation(_))
        ));

        let missing_quantity = ItemDraft {
            name: Some("Bolt".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            Item::create(missing_quantity, owner),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn negative_quantity_rejected() {
        let result = Item::create(draft("Bolt", -1), UserId::new());
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn update_never_reassigns_ownership() {
        let owner = UserId::new();
        let mut item = Item::create(draft("Bolt", 5), owner).unwrap();
        let created_at = item.created_at;

        item.apply_update(ItemDraft {
            name: Some("Bolt M8".to_string()),
            quantity: Some(7),
            location: Some(Location::SectionB),
            description: Some("coarse thread".to_string()),
        })
        .unwrap();

        assert_eq!(item.created_by, owner);
        assert_eq!(item.created_at, created_at);
        assert_eq!(item.name, "Bolt M8");
        assert_eq!(item.location, Location::SectionB);
    }

    #[test]
    fn update_omitting_optionals_clears_them() {
        let mut item = Item::create(
            ItemDraft {
                name: Some("Bolt".to_string()),
                quantity: Some(5),
                description: Some("coarse thread".to_string()),
                location: Some(Location::SectionA),
            },
            UserId::new(),
        )
        .unwrap();

        item.apply_update(draft("Bolt", 5)).unwrap();

        assert_eq!(item.description, None);
        assert_eq!(item.location, Location::Undefined);
    }

    #[test]
    fn update_dropping_required_field_is_rejected_not_defaulted() {
        let mut item = Item::create(draft("Bolt", 5), UserId::new()).unwrap();

        let result = item.apply_update(ItemDraft {
            name: Some("Bolt".to_string()),
            ..Default::default()
        });

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(item.quantity, 5);
    }

    #[test]
    fn location_serializes_to_section_labels() {
        let json = serde_json::to_value(Location::SectionA).unwrap();
        assert_eq!(json, "Section A");
        assert_eq!("Section D".parse::<Location>().unwrap(), Location::SectionD);
        assert!("Aisle 9".parse::<Location>().is_err());
    }

    proptest! {
        #[test]
        fn any_nonnegative_quantity_and_nonblank_name_validates(
            name in "[a-zA-Z0-9 ]{1,40}",
            quantity in 0i64..1_000_000,
        ) {
            prop_assume!(!name.trim().is_empty());
            let item = Item::create(draft(&name, quantity), UserId::new());
            prop_assert!(item.is_ok());
        }

        #[test]
        fn any_negative_quantity_fails(quantity in i64::MIN..0) {
            let result = Item::create(draft("Bolt", quantity), UserId::new());
            prop_assert!(result.is_err());
        }
    }
}
