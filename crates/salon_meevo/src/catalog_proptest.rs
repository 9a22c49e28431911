#[cfg(test)]
mod tests {
    use crate::catalog::{development_entries, IdentifierCheck, ServiceCatalog, ServiceResolver};
    use proptest::prelude::*;

    fn catalogs() -> [ServiceCatalog; 2] {
        [
            ServiceCatalog::new(development_entries(), IdentifierCheck::Heuristic).unwrap(),
            ServiceCatalog::new(development_entries(), IdentifierCheck::StrictUuid).unwrap(),
        ]
    }

    // Flip the case of each character where the mask says so
    fn recase(alias: &str, mask: &[bool]) -> String {
        alias
            .chars()
            .zip(mask.iter().cycle())
            .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
            .collect()
    }

    proptest! {
        // Any spelling of an alias resolves to the id its canonical form resolves to
        #[test]
        fn test_alias_and_canonical_resolve_alike(
            index in 0..25usize,
            mask in proptest::collection::vec(any::<bool>(), 1..8),
            leading in "[ \t]{0,3}",
            trailing in "[ \t]{0,3}",
        ) {
            for catalog in catalogs() {
                let table = catalog.alias_table();
                let (alias, id) = table.iter().nth(index % table.len()).unwrap();
                let spelled = format!("{}{}{}", leading, recase(alias, &mask), trailing);

                let via_alias = catalog.resolve(&spelled);
                let via_id = catalog.resolve(id);

                prop_assert_eq!(via_alias.as_deref(), Some(id.as_str()));
                prop_assert_eq!(via_alias, via_id);
            }
        }

        // Blank input never resolves
        #[test]
        fn test_blank_input_is_unresolved(blank in "[ \t\r\n]{0,10}") {
            for catalog in catalogs() {
                prop_assert_eq!(catalog.resolve(&blank), None);
            }
        }

        // Short inputs are never taken for canonical ids
        #[test]
        fn test_short_unknown_input_is_unresolved(raw in "[a-z]{1,5}-[a-z]{1,5}") {
            let catalog = ServiceCatalog::new(development_entries(), IdentifierCheck::Heuristic).unwrap();
            prop_assert_eq!(catalog.resolve(&raw), None);
        }
    }
}
