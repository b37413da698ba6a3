//! The equality/hash law across the three equivalence domains: whenever two
//! values are equivalent, their structural hashes agree. Two declarations
//! discovered via different paths must land on the same dedup key.

use metabridge::metadata::{MetaClassifier, MetaType, MetaTypeProjection, Variance};
use metabridge::mirror::{AnnotationMirror, AnnotationValue, TypeMirror};
use metabridge::{
    annotation_eqv, annotation_hash, meta_type_eqv, meta_type_hash, mirror_type_eqv,
    mirror_type_hash, resolve_type,
};
use std::collections::HashMap;

fn alias(name: &str) -> MetaType {
    MetaType {
        flags: 0,
        classifier: MetaClassifier::TypeAlias(name.to_string()),
        arguments: Vec::new(),
        abbreviated: None,
        flexible_upper_bound: None,
    }
}

/// `Map<String?, List<out User>>` built from scratch on every call, the way
/// two independent declarations would each synthesize it
fn deep_meta_type() -> MetaType {
    MetaType::class("kotlin/collections/Map").with_arguments(vec![
        MetaTypeProjection::invariant(MetaType::class("kotlin/String").nullable()),
        MetaTypeProjection::invariant(
            MetaType::class("kotlin/collections/List").with_arguments(vec![
                MetaTypeProjection::with_variance(Variance::Out, MetaType::class("app/model/User")),
            ]),
        ),
    ])
}

#[test]
fn test_law_holds_for_annotations() {
    let build = || AnnotationMirror {
        type_name: "app.Named".to_string(),
        values: vec![
            AnnotationValue::Str("db".to_string()),
            AnnotationValue::Int(3),
            AnnotationValue::Float(0.5),
        ],
        type_annotations: vec!["me.inject.Qualifier".to_string()],
    };
    let a = build();
    let b = build();

    assert!(annotation_eqv(&a, &b));
    assert_eq!(annotation_hash(&a), annotation_hash(&b));
}

#[test]
fn test_law_holds_for_mirror_types_at_depth() {
    let build = || {
        TypeMirror::parameterized(
            "java.util",
            "Map",
            vec![
                TypeMirror::declared("java.lang", "String"),
                TypeMirror::parameterized(
                    "java.util",
                    "List",
                    vec![TypeMirror::declared("app.model", "User")],
                ),
            ],
        )
    };
    let a = build();
    let b = build();

    assert!(mirror_type_eqv(&a, &b));
    assert_eq!(mirror_type_hash(&a), mirror_type_hash(&b));
}

#[test]
fn test_law_holds_for_meta_types_at_depth() {
    let a = deep_meta_type();
    let b = deep_meta_type();

    assert!(meta_type_eqv(&a, &b));
    assert_eq!(meta_type_hash(&a), meta_type_hash(&b));
}

#[test]
fn test_nullability_independence() {
    let plain = deep_meta_type();
    let nullable = deep_meta_type().nullable();

    assert!(!meta_type_eqv(&plain, &nullable));

    // nested nullability flips break equivalence too
    let mut deep_flip = deep_meta_type();
    deep_flip.arguments[0] = MetaTypeProjection::invariant(MetaType::class("kotlin/String"));
    assert!(!meta_type_eqv(&plain, &deep_flip));
}

#[test]
fn test_alias_transparency_through_resolution() {
    let actual = deep_meta_type();
    let aliased = deep_meta_type().abbreviated_as(alias("app/api/UserIndex"));

    let direct = resolve_type(&actual).expect("actual type resolves");
    let via_alias = resolve_type(&aliased).expect("aliased type resolves");

    // same qualified name and arguments; only the display origin differs
    assert_eq!(direct.qualified_name(), via_alias.qualified_name());
    assert_eq!(direct, via_alias);
    assert_eq!(
        via_alias.alias.as_ref().map(|name| name.qualified()),
        Some("app.api.UserIndex".to_string())
    );
}

#[test]
fn test_hashes_usable_as_dedup_keys() {
    // two paths discover the same logical type; a map keyed by the
    // structural hash must collapse them
    let mut seen: HashMap<u64, &'static str> = HashMap::new();
    let first = deep_meta_type();
    let second = deep_meta_type();

    seen.insert(meta_type_hash(&first), "first");
    let previous = seen.insert(meta_type_hash(&second), "second");
    assert_eq!(previous, Some("first"));

    let unrelated = MetaType::class("kotlin/Int");
    assert!(!seen.contains_key(&meta_type_hash(&unrelated)));
}

#[test]
fn test_variance_is_part_of_identity() {
    let out_user = deep_meta_type();
    let mut in_user = deep_meta_type();
    in_user.arguments[1] = MetaTypeProjection::invariant(
        MetaType::class("kotlin/collections/List").with_arguments(vec![
            MetaTypeProjection::with_variance(Variance::In, MetaType::class("app/model/User")),
        ]),
    );

    assert!(!meta_type_eqv(&out_user, &in_user));
}

#[test]
fn test_resolved_references_share_dedup_keys() {
    use std::collections::HashSet;

    // TypeRef equality ignores the alias origin, so aliased and direct
    // resolutions of the same actual type collapse in a set
    let direct = resolve_type(&deep_meta_type()).unwrap();
    let aliased = resolve_type(&deep_meta_type().abbreviated_as(alias("app/api/UserIndex"))).unwrap();

    let mut set = HashSet::new();
    set.insert(direct);
    set.insert(aliased);
    assert_eq!(set.len(), 1);
}
