//! Standard record layouts.
//!
//! - [`IntRecord`]: one `i32` field, the smallest useful record.
//! - [`Particle`]: a 3-D position plus mass and an alive flag.
//! - [`Mixed`]: one field of every primitive kind.

use stride_core::{Layout, LayoutBuilder};
use stride_pool::{ArrayAttribute, Attribute, PointAttribute};

/// One `i32` field named `value`.
pub struct IntRecord {
    pub layout: Layout,
    pub value: Attribute<i32>,
}

impl IntRecord {
    pub fn new() -> Self {
        let mut b = LayoutBuilder::new();
        let value = Attribute::new(b.scalar::<i32>("value"));
        Self {
            layout: b.build().expect("int record layout"),
            value,
        }
    }
}

impl Default for IntRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// Position, mass and liveness of a simulated particle.
pub struct Particle {
    pub layout: Layout,
    pub pos: PointAttribute,
    pub mass: Attribute<f32>,
    pub alive: Attribute<bool>,
}

impl Particle {
    pub fn new() -> Self {
        let mut b = LayoutBuilder::new();
        let pos = PointAttribute::new(b.array::<f64>("pos", 3));
        let mass = Attribute::new(b.scalar::<f32>("mass"));
        let alive = Attribute::new(b.scalar::<bool>("alive"));
        Self {
            layout: b.build().expect("particle layout"),
            pos,
            mass,
            alive,
        }
    }
}

impl Default for Particle {
    fn default() -> Self {
        Self::new()
    }
}

/// One field of every primitive kind, plus a short `u16` array.
pub struct Mixed {
    pub layout: Layout,
    pub flag: Attribute<bool>,
    pub byte: Attribute<i8>,
    pub ubyte: Attribute<u8>,
    pub short: Attribute<i16>,
    pub ushort: Attribute<u16>,
    pub int: Attribute<i32>,
    pub uint: Attribute<u32>,
    pub long: Attribute<i64>,
    pub ulong: Attribute<u64>,
    pub float: Attribute<f32>,
    pub double: Attribute<f64>,
    pub tags: ArrayAttribute<u16>,
}

impl Mixed {
    pub fn new() -> Self {
        let mut b = LayoutBuilder::new();
        let flag = Attribute::new(b.scalar::<bool>("flag"));
        let byte = Attribute::new(b.scalar::<i8>("byte"));
        let ubyte = Attribute::new(b.scalar::<u8>("ubyte"));
        let short = Attribute::new(b.scalar::<i16>("short"));
        let ushort = Attribute::new(b.scalar::<u16>("ushort"));
        let int = Attribute::new(b.scalar::<i32>("int"));
        let uint = Attribute::new(b.scalar::<u32>("uint"));
        let long = Attribute::new(b.scalar::<i64>("long"));
        let ulong = Attribute::new(b.scalar::<u64>("ulong"));
        let float = Attribute::new(b.scalar::<f32>("float"));
        let double = Attribute::new(b.scalar::<f64>("double"));
        let tags = ArrayAttribute::new(b.array::<u16>("tags", 4));
        Self {
            layout: b.build().expect("mixed layout"),
            flag,
            byte,
            ubyte,
            short,
            ushort,
            int,
            uint,
            long,
            ulong,
            float,
            double,
            tags,
        }
    }
}

impl Default for Mixed {
    fn default() -> Self {
        Self::new()
    }
}
