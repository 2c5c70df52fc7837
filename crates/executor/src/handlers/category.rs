//! Category handlers.
//!
//! These handlers mutate category records and permissions. `describe` is
//! the only one that touches the redirect ledger.

use tracing::{debug, info};

use recat_core::{Permissions, Repository, Viewer};

use crate::executor::RunContext;
use crate::operation::{CategoryRef, Describe, Reparent};
use crate::{Output, Result};

/// Handle describe.
///
/// Only provided fields change. A new slug changes the category's
/// reference string, so the category is ledgered onto itself.
pub fn describe(repo: &dyn Repository, ctx: &mut RunContext, args: &Describe) -> Result<Output> {
    let mut category = repo.category(args.category)?;
    if let Some(name) = &args.name {
        category.name = name.clone();
    }
    if let Some(description) = &args.description {
        category.description = Some(description.clone());
    }
    if let Some(slug) = &args.slug {
        category.slug = slug.clone();
        ctx.ledger.record(args.category, args.category);
    }
    if let Some(color) = &args.color {
        category.color = color.clone();
    }
    repo.save_category(&category)?;
    repo.rename_category_definition(args.category)?;
    Ok(Output::CategoryUpdated {
        category: args.category,
    })
}

/// Handle setHiddenCategory.
///
/// Only changes where later `hideCategory` calls park categories.
pub fn set_hidden_category(
    repo: &dyn Repository,
    ctx: &mut RunContext,
    args: &CategoryRef,
) -> Result<Output> {
    repo.category(args.category)?;
    ctx.hidden_category = Some(args.category);
    Ok(Output::Unit)
}

/// Handle hideCategory.
pub fn hide_category(repo: &dyn Repository, ctx: &RunContext, args: &CategoryRef) -> Result<Output> {
    repo.set_permissions(args.category, Permissions::admins_only())?;
    match ctx.hidden_category {
        Some(parent) if parent != args.category => {
            reparent_category(
                repo,
                &Reparent {
                    category: args.category,
                    parent,
                    recolor: true,
                },
            )?;
        }
        _ => {}
    }
    Ok(Output::PermissionsChanged { count: 1 })
}

/// Handle exposeCategory.
pub fn expose_category(repo: &dyn Repository, args: &CategoryRef) -> Result<Output> {
    repo.set_permissions(args.category, Permissions::everyone_full())?;
    Ok(Output::PermissionsChanged { count: 1 })
}

/// Handle publicCategoriesReadonly.
///
/// Visibility is evaluated per category with the anonymous viewer's rule,
/// so restricted categories keep their permissions untouched.
pub fn public_categories_readonly(repo: &dyn Repository) -> Result<Output> {
    let mut count = 0;
    for category in repo.categories()? {
        if repo.can_see_category(Viewer::Anonymous, category.id)? {
            repo.set_permissions(category.id, Permissions::public_readonly())?;
            count += 1;
        } else {
            debug!(target: "recat::op", category = %category.id, "Not public, left as is");
        }
    }
    info!(target: "recat::op", count, "Public categories made read-only");
    Ok(Output::PermissionsChanged { count })
}

/// Handle reparentCategory.
pub fn reparent_category(repo: &dyn Repository, args: &Reparent) -> Result<Output> {
    let parent = repo.category(args.parent)?;
    let mut category = repo.category(args.category)?;
    category.parent = Some(parent.id);
    if args.recolor {
        category.color = parent.color;
    }
    repo.save_category(&category)?;
    Ok(Output::CategoryUpdated {
        category: args.category,
    })
}
