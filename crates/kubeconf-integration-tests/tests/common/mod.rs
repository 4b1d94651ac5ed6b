//! Shared helpers for integration tests.

use kubeconf_config::{ConfigDocument, ConfigResult, path};
use kubeconf_test::TempKubeconfig;

/// Parse `property` and set `raw` on `doc` the way the CLI does.
#[allow(dead_code)]
pub fn set_raw(doc: &mut ConfigDocument, property: &str, raw: &str) -> ConfigResult<()> {
    doc.set_raw_property(property, raw, false)
}

/// Load, mutate and persist the harness file through `ConfigAccess`.
#[allow(dead_code)]
pub fn edit<T>(
    kubeconfig: &TempKubeconfig,
    f: impl FnOnce(&mut ConfigDocument) -> ConfigResult<T>,
) -> ConfigResult<T> {
    kubeconfig.access().modify_config(f).map(|(_, out)| out)
}

/// Read a leaf as text, or `None` when absent.
#[allow(dead_code)]
pub fn leaf_text(doc: &ConfigDocument, property: &str) -> Option<String> {
    let steps = path::parse(property).ok()?;
    path::get(doc, &steps)
        .ok()
        .flatten()
        .and_then(|p| p.as_value().map(ToString::to_string))
}

/// Sort a name list for order-insensitive comparison.
#[allow(dead_code)]
pub fn sorted(mut names: Vec<String>) -> Vec<String> {
    names.sort();
    names
}
