//! CLI handlers for the `kubeconf config` subcommand.
//!
//! Handlers write their normal output to `out` and report failures through
//! the returned error; `main` prints the error.

use std::io::Write;

use anyhow::{Result, bail};
use kubeconf_config::path::{self, Property};
use kubeconf_config::reset::{self, CURRENT_CONTEXT_PROPERTY};
use kubeconf_config::{ConfigAccess, PropertyValue, loader};
use tracing::info;

/// Render names the way `kubectl` prints a string slice: `[a b c]`.
fn bracketed(names: &[String]) -> String {
    format!("[{}]", names.join(" "))
}

/// Clear the current context and preferences and delete every cluster,
/// context and user.
pub(crate) fn reset(access: &ConfigAccess, out: &mut impl Write) -> Result<()> {
    let (file, deleted) = access.modify_config(reset::reset)?;
    let file = file.display().to_string();
    info!(file = %file, "reset kubeconfig");

    writeln!(out, "Property {CURRENT_CONTEXT_PROPERTY:?} unset from {file:?}")?;
    writeln!(out, "All preferences are unset from {file:?}")?;
    writeln!(
        out,
        "Deleted all cluster(s) {} from {file:?}",
        bracketed(&deleted.clusters)
    )?;
    writeln!(
        out,
        "Deleted all context(s) {} from {file:?}",
        bracketed(&deleted.contexts)
    )?;
    writeln!(
        out,
        "Deleted all user(s) {} from {file:?}",
        bracketed(&deleted.users)
    )?;
    Ok(())
}

/// Set a property from command-line text.
pub(crate) fn set(
    access: &ConfigAccess,
    property: &str,
    value: &str,
    raw_bytes: bool,
    out: &mut impl Write,
) -> Result<()> {
    let steps = path::parse(property)?;
    let value = PropertyValue::from_raw(steps.target(), property, value, raw_bytes)?;
    let (file, ()) = access.modify_config(|doc| Ok(path::set(doc, &steps, value)?))?;
    info!(property, file = %file.display(), "set property");

    writeln!(out, "Property {property:?} set.")?;
    Ok(())
}

/// Unset a property.
pub(crate) fn unset(access: &ConfigAccess, property: &str, out: &mut impl Write) -> Result<()> {
    let steps = path::parse(property)?;
    let (file, ()) = access.modify_config(|doc| Ok(path::unset(doc, &steps)?))?;
    info!(property, file = %file.display(), "unset property");

    writeln!(out, "Property {property:?} unset.")?;
    Ok(())
}

/// Print a property: leaves as text, records and maps as YAML.
pub(crate) fn get(access: &ConfigAccess, property: &str, out: &mut impl Write) -> Result<()> {
    let steps = path::parse(property)?;
    let (_, doc) = access.starting_config()?;

    match path::get(&doc, &steps)? {
        Some(Property::Value(value)) => writeln!(out, "{value}")?,
        Some(Property::Tree(tree)) => write!(out, "{}", serde_yaml::to_string(&tree)?)?,
        None => bail!("property {property:?} is not set"),
    }
    Ok(())
}

/// Print the whole kubeconfig.
pub(crate) fn view(access: &ConfigAccess, out: &mut impl Write) -> Result<()> {
    let (_, doc) = access.starting_config()?;
    write!(out, "{}", loader::to_yaml(&doc)?)?;
    Ok(())
}

/// Print the current context.
pub(crate) fn current_context(access: &ConfigAccess, out: &mut impl Write) -> Result<()> {
    let (_, doc) = access.starting_config()?;
    if doc.current_context.is_empty() {
        bail!("current-context is not set");
    }
    writeln!(out, "{}", doc.current_context)?;
    Ok(())
}
