//! Plane shapes and their perimeter.
use std::f64::consts::PI;

use enum_map::Enum;
use strum::{AsRefStr, Display, EnumIter};
use tagswitch::{DispatchTable, Handler, Variant};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub width: f64,
    pub height: f64,
}

/// Triangle given by the lengths of its three sides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Circle {
    pub fn perimeter(&self) -> f64 {
        2.0 * PI * self.radius
    }
}

impl Rectangle {
    pub fn perimeter(&self) -> f64 {
        2.0 * (self.width + self.height)
    }
}

impl Triangle {
    pub fn perimeter(&self) -> f64 {
        self.a + self.b + self.c
    }
}

/// Kind of a [`Shape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, EnumIter, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ShapeKind {
    Circle,
    Rectangle,
    Triangle,
}

#[derive(Debug, Clone, Copy, PartialEq, Variant)]
#[variant(discriminant = ShapeKind)]
pub enum Shape {
    Circle(Circle),
    Rectangle(Rectangle),
    Triangle(Triangle),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        self.discriminant()
    }

    pub fn perimeter(&self) -> f64 {
        match self {
            Shape::Circle(circle) => circle.perimeter(),
            Shape::Rectangle(rectangle) => rectangle.perimeter(),
            Shape::Triangle(triangle) => triangle.perimeter(),
        }
    }
}

macro_rules! shape_payload {
    ($($payload:ident),* $(,)?) => {
        $(
            impl From<$payload> for Shape {
                fn from(payload: $payload) -> Self {
                    Shape::$payload(payload)
                }
            }

            impl TryFrom<Shape> for $payload {
                type Error = Shape;

                fn try_from(shape: Shape) -> Result<Self, Shape> {
                    match shape {
                        Shape::$payload(payload) => Ok(payload),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

shape_payload!(Circle, Rectangle, Triangle);

const PERIMETER_TABLE: &str = "perimeter";

/// Perimeter of every shape kind, as a dispatch table.
pub fn perimeter_table() -> DispatchTable<Shape, f64> {
    DispatchTable::from_fn(PERIMETER_TABLE, |kind| match kind {
        ShapeKind::Circle => perimeter_of(kind, Circle::perimeter),
        ShapeKind::Rectangle => perimeter_of(kind, Rectangle::perimeter),
        ShapeKind::Triangle => perimeter_of(kind, Triangle::perimeter),
    })
}

/// Handler for the shapes of `kind`, whose payload is a `P`.
fn perimeter_of<P>(kind: ShapeKind, perimeter: fn(&P) -> f64) -> Handler<Shape, f64>
where
    P: TryFrom<Shape, Error = Shape> + 'static,
{
    Box::new(move |shape| match P::try_from(shape) {
        Ok(payload) => perimeter(&payload),
        Err(other) => unreachable!(
            "`{PERIMETER_TABLE}` routed a `{}` shape to the `{kind}` handler",
            other.kind()
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_computes_its_own_kind() {
        let handler = perimeter_of(ShapeKind::Rectangle, Rectangle::perimeter);
        let shape = Shape::from(Rectangle {
            width: 1.0,
            height: 2.0,
        });
        assert_eq!(handler(shape), 6.0);
    }

    #[test]
    #[should_panic(expected = "routed a `circle` shape to the `triangle` handler")]
    fn handler_names_both_kinds_on_mismatch() {
        let handler = perimeter_of(ShapeKind::Triangle, Triangle::perimeter);
        handler(Shape::from(Circle { radius: 1.0 }));
    }
}
