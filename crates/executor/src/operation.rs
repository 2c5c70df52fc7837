//! Operation enum defining every rearrangement mutation.
//!
//! Operations are the "instruction set" of a rearrangement plan. Each
//! variant carries a typed argument record whose fields are the operation's
//! named parameters; optional parameters are `None` when absent.
//!
//! Operations are:
//! - **Typed**: no generic fallback; unknown names are rejected at parse time
//! - **Pure data**: executing them is the [`Executor`](crate::Executor)'s job
//!
//! In a plan file every operation is written under its camelCase name:
//!
//! ```yaml
//! - movePosts:
//!     source: 3
//!     target: 6
//!     withTag: faq
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use recat_core::CategoryId;

use crate::{Error, Result};

/// Update display fields of a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Describe {
    /// Category to update
    pub category: CategoryId,
    /// New display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New colour, hex without `#`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Changing the slug changes the category's reference string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

/// Register a URL redirect to a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Redirect {
    /// Path to redirect
    pub url: String,
    /// Redirect target
    pub category: CategoryId,
}

/// Move topics from one category to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MovePosts {
    /// Category topics leave
    pub source: CategoryId,
    /// Category topics land in
    pub target: CategoryId,
    /// Tag every source topic with this before moving.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_tag: Option<String>,
    /// Only move topics carrying this tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_tag: Option<String>,
    /// Hide the source afterwards; see [`MovePolicy`](crate::MovePolicy)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide: Option<bool>,
    /// Redirect the source URL to the target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<bool>,
}

/// An operation on a single category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CategoryRef {
    /// Category operated on
    pub category: CategoryId,
}

/// An operation pairing a category with a tag name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CategoryTag {
    /// Category whose topics are affected
    pub category: CategoryId,
    /// Tag name
    pub tag: String,
}

/// Nest a category under a new parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Reparent {
    /// Category to move
    pub category: CategoryId,
    /// New parent
    pub parent: CategoryId,
    /// Copy the parent's colour onto the category.
    #[serde(default = "default_recolor")]
    pub recolor: bool,
}

fn default_recolor() -> bool {
    true
}

/// No parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoArgs {}

/// A rearrangement operation.
///
/// | Operation | Effect |
/// |-----------|--------|
/// | `describe` | name/description/colour/slug; slug change is ledgered |
/// | `redirect` | URL-level redirect rule |
/// | `movePosts` | bulk topic move, optional hide + redirect + ledger |
/// | `setHiddenCategory` | where `hideCategory` parks hidden categories |
/// | `hideCategory` | admins-only permissions, optional reparent |
/// | `exposeCategory` | full access for everyone |
/// | `publicCategoriesReadonly` | anonymous-visible categories become read-only |
/// | `removeTagInCategory` | detach a tag from a category's topics |
/// | `tagCategory` | attach a tag to every topic in a category |
/// | `reparentCategory` | new parent, optional recolour |
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Update display fields
    Describe(Describe),
    /// Register a URL redirect
    Redirect(Redirect),
    /// Bulk topic move
    MovePosts(MovePosts),
    /// Choose where hidden categories are parked
    SetHiddenCategory(CategoryRef),
    /// Restrict to administrators
    HideCategory(CategoryRef),
    /// Open to everyone
    ExposeCategory(CategoryRef),
    /// Make every anonymously visible category read-only
    PublicCategoriesReadonly,
    /// Detach a tag from a category's topics
    RemoveTagInCategory(CategoryTag),
    /// Attach a tag to a category's topics
    TagCategory(CategoryTag),
    /// Move under a new parent
    ReparentCategory(Reparent),
}

/// Every operation name accepted in a plan.
pub const OPERATION_NAMES: &[&str] = &[
    "describe",
    "redirect",
    "movePosts",
    "setHiddenCategory",
    "hideCategory",
    "exposeCategory",
    "publicCategoriesReadonly",
    "removeTagInCategory",
    "tagCategory",
    "reparentCategory",
];

impl Operation {
    /// Returns the plan name of this operation.
    ///
    /// The exhaustive match ensures the compiler flags any new `Operation`
    /// variant that is added without a corresponding name.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Describe(_) => "describe",
            Operation::Redirect(_) => "redirect",
            Operation::MovePosts(_) => "movePosts",
            Operation::SetHiddenCategory(_) => "setHiddenCategory",
            Operation::HideCategory(_) => "hideCategory",
            Operation::ExposeCategory(_) => "exposeCategory",
            Operation::PublicCategoriesReadonly => "publicCategoriesReadonly",
            Operation::RemoveTagInCategory(_) => "removeTagInCategory",
            Operation::TagCategory(_) => "tagCategory",
            Operation::ReparentCategory(_) => "reparentCategory",
        }
    }

    /// Build an operation from its plan name and argument mapping.
    ///
    /// `index` is the 1-based record position, used in error messages.
    /// `args` must already have its `context` key removed.
    pub fn from_parts(index: usize, name: &str, args: serde_yaml::Value) -> Result<Self> {
        let op = match name {
            "describe" => Operation::Describe(parse_args(index, name, args)?),
            "redirect" => Operation::Redirect(parse_args(index, name, args)?),
            "movePosts" => Operation::MovePosts(parse_args(index, name, args)?),
            "setHiddenCategory" => Operation::SetHiddenCategory(parse_args(index, name, args)?),
            "hideCategory" => Operation::HideCategory(parse_args(index, name, args)?),
            "exposeCategory" => Operation::ExposeCategory(parse_args(index, name, args)?),
            "publicCategoriesReadonly" => {
                let _: NoArgs = parse_args(index, name, args)?;
                Operation::PublicCategoriesReadonly
            }
            "removeTagInCategory" => Operation::RemoveTagInCategory(parse_args(index, name, args)?),
            "tagCategory" => Operation::TagCategory(parse_args(index, name, args)?),
            "reparentCategory" => Operation::ReparentCategory(parse_args(index, name, args)?),
            other => {
                return Err(Error::UnknownOperation {
                    index,
                    name: other.to_string(),
                })
            }
        };
        Ok(op)
    }

    /// The operation's arguments rendered as compact JSON, for announcements.
    pub fn args_json(&self) -> String {
        let rendered = match self {
            Operation::Describe(a) => serde_json::to_string(a),
            Operation::Redirect(a) => serde_json::to_string(a),
            Operation::MovePosts(a) => serde_json::to_string(a),
            Operation::SetHiddenCategory(a)
            | Operation::HideCategory(a)
            | Operation::ExposeCategory(a) => serde_json::to_string(a),
            Operation::PublicCategoriesReadonly => serde_json::to_string(&NoArgs {}),
            Operation::RemoveTagInCategory(a) | Operation::TagCategory(a) => {
                serde_json::to_string(a)
            }
            Operation::ReparentCategory(a) => serde_json::to_string(a),
        };
        rendered.unwrap_or_else(|e| format!("<unrenderable: {}>", e))
    }
}

/// Deserialize an argument record; a missing (null) mapping counts as empty.
fn parse_args<T: DeserializeOwned>(index: usize, name: &str, args: serde_yaml::Value) -> Result<T> {
    let args = match args {
        serde_yaml::Value::Null => serde_yaml::Value::Mapping(serde_yaml::Mapping::new()),
        other => other,
    };
    serde_yaml::from_value(args).map_err(|e| Error::InvalidArguments {
        index,
        operation: name.to_string(),
        reason: e.to_string(),
    })
}
