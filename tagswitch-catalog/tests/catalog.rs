use std::f64::consts::PI;
use std::panic::{self, AssertUnwindSafe};

use tagswitch::{Discriminant, RawDiscriminant, UnhandledVariant, Variant};
use tagswitch_catalog::animal::{legacy_sound_table, sound_table};
use tagswitch_catalog::shape::perimeter_table;
use tagswitch_catalog::taste::taste_table;
use tagswitch_catalog::{Animal, Circle, Rectangle, Shape, ShapeKind, Taste, Triangle};

fn close(lhs: f64, rhs: f64) -> bool {
    (lhs - rhs).abs() < 1e-9
}

#[test]
fn circle_perimeter() {
    let shape = Shape::from(Circle { radius: 2.0 });
    assert_eq!(shape.kind(), ShapeKind::Circle);
    assert!(close(shape.perimeter(), 4.0 * PI));
    assert!(close(perimeter_table().dispatch(shape), 12.566370614359172));
}

#[test]
fn rectangle_perimeter() {
    let shape = Shape::from(Rectangle {
        width: 3.0,
        height: 4.0,
    });
    assert_eq!(shape.kind(), ShapeKind::Rectangle);
    assert_eq!(shape.perimeter(), 14.0);
    assert_eq!(perimeter_table().dispatch(shape), 14.0);
}

#[test]
fn triangle_perimeter() {
    let shape = Shape::from(Triangle {
        a: 3.0,
        b: 4.0,
        c: 5.0,
    });
    assert_eq!(shape.kind(), ShapeKind::Triangle);
    assert_eq!(shape.perimeter(), 12.0);
    assert_eq!(perimeter_table().dispatch(shape), 12.0);
}

#[test]
fn perimeter_table_agrees_with_native_match() {
    let table = perimeter_table();
    let shapes = [
        Shape::from(Circle { radius: 0.5 }),
        Shape::from(Rectangle {
            width: 1.5,
            height: 2.5,
        }),
        Shape::from(Triangle {
            a: 1.0,
            b: 1.0,
            c: 1.0,
        }),
    ];

    assert_eq!(table.len(), ShapeKind::COUNT);
    for shape in shapes {
        assert!(close(table.dispatch(shape), shape.perimeter()));
        assert_eq!(table.dispatch(shape), table.dispatch(shape));
    }
}

#[test]
fn payload_conversion_follows_the_kind() {
    let shape = Shape::from(Circle { radius: 1.0 });
    assert_eq!(Circle::try_from(shape), Ok(Circle { radius: 1.0 }));
    assert_eq!(Rectangle::try_from(shape), Err(shape));
    assert_eq!(shape.discriminant().tag(), "circle");
}

#[test]
fn every_animal_has_a_sound() {
    let table = sound_table();
    for animal in Animal::all() {
        assert_eq!(table.dispatch(animal), animal.sound());
    }
    assert_eq!(table.dispatch(Animal::Chicken), "cluck");
    assert_eq!(table.try_dispatch_tag("dog"), Ok("woof"));
}

#[test]
fn legacy_table_does_not_know_the_chicken() {
    let table = legacy_sound_table().expect("dog and cat are registered once");

    assert_eq!(table.dispatch(Animal::Dog), "woof");
    assert_eq!(table.dispatch(Animal::Cat), "meow");
    assert_eq!(table.missing(), vec![Animal::Chicken]);

    let err = table
        .try_dispatch(Animal::Chicken)
        .expect_err("the chicken was never registered");
    assert_eq!(err.discriminant, Animal::Chicken);

    let payload = panic::catch_unwind(AssertUnwindSafe(|| table.dispatch(Animal::Chicken)))
        .expect_err("dispatching a chicken must not return");
    let failure = payload
        .downcast_ref::<UnhandledVariant<Animal>>()
        .expect("payload should be the unhandled variant");
    assert_eq!(failure.discriminant, Animal::Chicken);
    assert_eq!(failure.table, "legacy-animal-sounds");
}

#[test]
fn legacy_table_cannot_be_promoted() {
    let table = legacy_sound_table().expect("dog and cat are registered once");
    let err = table.complete().expect_err("the chicken is missing");
    assert!(err.to_string().contains("chicken"), "{err}");
}

#[test]
fn unknown_animal_is_unhandled() {
    let table = sound_table();

    let err = table.try_dispatch_tag("cow").expect_err("no cow on this farm");
    assert_eq!(err.discriminant, RawDiscriminant::Tag("cow".to_string()));

    let err = table.try_dispatch_raw(Animal::COUNT).expect_err("out of range");
    assert_eq!(err.discriminant, RawDiscriminant::Index(3));
}

#[test]
fn bundled_taste_manifest_covers_every_taste() {
    let table = taste_table().expect("bundled manifest lists every taste");
    assert_eq!(table.name(), "taste-descriptions");
    for taste in Taste::all() {
        assert!(!table.dispatch(taste).is_empty(), "{taste} has no description");
    }
    assert!(table.dispatch(Taste::Sourness).contains("lemon"));
}
