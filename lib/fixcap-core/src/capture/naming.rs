//! Stable fixture file names derived from collection and exchange identity.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9]").expect("a valid regex"));

/// Computes the fixture file name for one exchange.
///
/// The collection slug comes from the collection file name with its
/// `.postman_collection.json` suffix stripped; the exchange slug from the
/// item's human-readable label. Both are normalized the same way: every
/// character outside `[a-z0-9]` (case-insensitive) becomes `_` and the
/// result is lower-cased. The two slugs compose as
/// `<collection>.<label>.json`.
///
/// Distinct labels can normalize to the same slug; the last exchange with a
/// given name wins. That overwrite is a documented limitation, not
/// something this function tries to detect.
///
/// ```
/// use std::path::Path;
/// use fixcap_core::fixture_file_name;
///
/// let name = fixture_file_name(Path::new("Orders.postman_collection.json"), "Get Order #1");
/// assert_eq!(name, "orders.get_order__1.json");
/// ```
#[must_use]
pub fn fixture_file_name(collection_path: &Path, label: &str) -> String {
    let collection = slugify(&collection_stem(collection_path));
    let exchange = slugify(label);
    format!("{collection}.{exchange}.json")
}

fn collection_stem(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.strip_suffix(".postman_collection.json")
        .or_else(|| name.strip_suffix(".json"))
        .unwrap_or(&name)
        .to_string()
}

fn slugify(input: &str) -> String {
    NON_ALPHANUMERIC.replace_all(input, "_").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Orders.postman_collection.json", "Get Order #1", "orders.get_order__1.json")]
    #[case("Orders.postman_collection.json", "List Orders", "orders.list_orders.json")]
    #[case("billing.json", "Refund", "billing.refund.json")]
    #[case("Smoke Tests.postman_collection.json", "Ping", "smoke_tests.ping.json")]
    fn should_compose_collection_and_label_slugs(
        #[case] collection: &str,
        #[case] label: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(fixture_file_name(Path::new(collection), label), expected);
    }

    #[test]
    fn should_ignore_the_collection_directory() {
        let name = fixture_file_name(
            Path::new("/var/collections/Orders.postman_collection.json"),
            "Get Order",
        );
        assert_eq!(name, "orders.get_order.json");
    }

    #[test]
    fn should_be_deterministic() {
        let path = Path::new("Orders.postman_collection.json");
        assert_eq!(
            fixture_file_name(path, "Get Order #1"),
            fixture_file_name(path, "Get Order #1")
        );
    }

    #[test]
    fn should_collide_for_labels_with_the_same_normalization() {
        let path = Path::new("Orders.postman_collection.json");
        assert_eq!(
            fixture_file_name(path, "Get Order #1"),
            fixture_file_name(path, "get order_#1")
        );
    }
}
