//! Farm animals and the sound they make.
use enum_map::Enum;
use strum::{AsRefStr, Display, EnumIter};
use tagswitch::{DispatchResult, DispatchTable, Handler, PartialTable, Variant};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, EnumIter, AsRefStr, Display, Variant,
)]
#[strum(serialize_all = "snake_case")]
pub enum Animal {
    Dog,
    Cat,
    Chicken,
}

impl Animal {
    pub fn sound(self) -> &'static str {
        match self {
            Animal::Dog => "woof",
            Animal::Cat => "meow",
            Animal::Chicken => "cluck",
        }
    }
}

/// Sound of every animal.
pub fn sound_table() -> DispatchTable<Animal, &'static str> {
    DispatchTable::from_fn("animal-sounds", |animal| -> Handler<Animal, &'static str> {
        match animal {
            Animal::Dog => Box::new(|_| "woof"),
            Animal::Cat => Box::new(|_| "meow"),
            Animal::Chicken => Box::new(|_| "cluck"),
        }
    })
}

/// Sound table predating [`Animal::Chicken`]. Dispatching a chicken through it is fatal.
pub fn legacy_sound_table() -> DispatchResult<PartialTable<Animal, &'static str>> {
    DispatchTable::<Animal, &'static str>::builder("legacy-animal-sounds")
        .on(Animal::Dog, |_| "woof")
        .on(Animal::Cat, |_| "meow")
        .build_partial()
}
