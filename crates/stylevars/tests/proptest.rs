//! Property-based tests for naming and resolution using proptest.

use std::collections::HashSet;

use proptest::prelude::*;
use stylevars::generator::{css, views};
use stylevars::{
    Backend, Color, Generator, GeneratorConfig, Mode, ValidationError, VariableTable,
};

// ============================================================================
// Strategies
// ============================================================================

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,6}(_[a-z0-9]{1,6}){0,3}"
}

/// Names that mix `_` and `-` separators, as definition files allow.
fn separated_name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,6}([_-][a-z0-9]{1,6}){0,3}"
}

fn prefix_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "[a-z]{1,5}"]
}

fn names_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set(name_strategy(), 1..12).prop_map(|set| set.into_iter().collect())
}

fn table_of(names: &[String]) -> VariableTable {
    names.iter().enumerate().fold(VariableTable::new(), |table, (i, name)| {
        table.add(name, Color::rgb(i as u8, 0, 0))
    })
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Transforming an already transformed CSS name changes nothing.
    #[test]
    fn css_names_are_idempotent(prefix in prefix_strategy(), name in name_strategy()) {
        let once = css::to_var_name(&prefix, &name);
        prop_assert_eq!(css::to_var_name(&prefix, &once), once);
    }

    /// Transforming an already transformed Views name changes nothing.
    #[test]
    fn views_names_are_idempotent(prefix in prefix_strategy(), name in name_strategy()) {
        let once = views::to_const_name(&prefix, &name);
        prop_assert_eq!(views::to_const_name(&prefix, &once), once);
    }

    /// Hyphenated names become plain identifiers and stay fixed afterwards.
    #[test]
    fn views_names_with_hyphens_are_idempotent(
        prefix in prefix_strategy(),
        name in separated_name_strategy(),
    ) {
        let once = views::to_const_name(&prefix, &name);
        prop_assert!(once.chars().all(|c| c.is_ascii_alphanumeric()), "{}", once);
        prop_assert_eq!(views::to_const_name(&prefix, &once), once);
    }

    /// Swapping `_` for `-` gives the same Views name.
    #[test]
    fn views_separators_are_interchangeable(name in separated_name_strategy()) {
        let underscored = name.replace('-', "_");
        prop_assert_eq!(
            views::to_const_name("", &name),
            views::to_const_name("", &underscored)
        );
    }

    /// Validation passes exactly when the generated names are distinct.
    #[test]
    fn collisions_fail_fast(names in names_strategy(), prefix in prefix_strategy()) {
        let table = table_of(&names);
        let config = GeneratorConfig::new().with_prefix(prefix.clone());
        let generator = Generator::new(Backend::Views, &table, config);

        let generated: HashSet<String> = names
            .iter()
            .map(|name| views::to_const_name(&prefix, name))
            .collect();

        match generator.validate() {
            Ok(()) => prop_assert_eq!(generated.len(), names.len()),
            Err(ValidationError::NameCollision { first, second, .. }) => {
                prop_assert!(generated.len() < names.len());
                prop_assert_eq!(
                    views::to_const_name(&prefix, &first),
                    views::to_const_name(&prefix, &second)
                );
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    /// CSS names never collide for names without hyphens, `_rgb` suffixes aside.
    #[test]
    fn css_names_are_injective(names in names_strategy()) {
        let table = table_of(&names);
        let generator = Generator::new(Backend::Css, &table, GeneratorConfig::default());
        let clashes_with_rgb = names
            .iter()
            .any(|name| names.contains(&format!("{}_rgb", name)));

        prop_assert_eq!(generator.validate().is_ok(), !clashes_with_rgb);
    }

    /// Every link in an alias chain resolves to the channels at its end.
    #[test]
    fn alias_chains_resolve_to_the_root(
        len in 1usize..8,
        rgb in any::<(u8, u8, u8)>(),
        use_rgb_alias in prop::collection::vec(any::<bool>(), 8),
    ) {
        let (r, g, b) = rgb;
        let mut table = VariableTable::new().add("v0", Color::rgb(r, g, b));
        for i in 1..=len {
            let target = format!("v{}", i - 1);
            let color = if use_rgb_alias[i - 1] {
                Color::rgb_alias(target, 1.0)
            } else {
                Color::alias(target)
            };
            table = table.add(&format!("v{}", i), color);
        }

        let config = GeneratorConfig::default();
        let resolver = stylevars::Resolver::new(&table, &config);
        for i in 0..=len {
            for mode in Mode::ALL {
                let resolved = resolver.resolve_flat(&format!("v{}", i), mode).unwrap();
                prop_assert_eq!(resolved.rgb(), (r, g, b));
            }
        }
    }
}
