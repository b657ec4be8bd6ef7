// cvar.rs — configuration variable model

use std::collections::HashMap;

use log::debug;

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct CvarFlags: u32 {
        const ARCHIVE    = 0x01;
        const USERINFO   = 0x02;
        const SERVERINFO = 0x04;
        const NOSET      = 0x08;
        const LATCH      = 0x10;
    }
}

/// Persistence scope attached to every write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CvarSource {
    Console,
    Archive,
}

/// A configuration variable.
#[derive(Clone, Debug)]
pub struct Cvar {
    pub name: String,
    pub string: String,
    pub value: f32,
    pub flags: CvarFlags,
    pub modified: bool,
}

impl Cvar {
    pub fn integer(&self) -> i32 {
        self.value as i32
    }
}

/// Read/write access to configuration values owned by the embedding layer.
/// Missing variables read as zero.
pub trait CvarStore {
    fn get_value(&self, name: &str) -> f32;
    fn set_value(&mut self, name: &str, value: f32, source: CvarSource);

    fn get_integer(&self, name: &str) -> i32 {
        self.get_value(name) as i32
    }

    fn set_integer(&mut self, name: &str, value: i32, source: CvarSource) {
        self.set_value(name, value as f32, source);
    }
}

fn value_string(value: f32) -> String {
    if value == value.trunc() {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// In-memory variable table. O(1) lookup by name.
#[derive(Default)]
pub struct CvarRegistry {
    vars: Vec<Cvar>,
    index: HashMap<String, usize>,
}

impl CvarRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a variable unless it already exists; an existing variable
    /// keeps its current value and gains the given flags.
    pub fn register(&mut self, name: &str, value: &str, flags: CvarFlags) {
        if let Some(&idx) = self.index.get(name) {
            self.vars[idx].flags |= flags;
            return;
        }
        let idx = self.vars.len();
        self.vars.push(Cvar {
            name: name.to_owned(),
            string: value.to_owned(),
            value: value.parse().unwrap_or(0.0),
            flags,
            modified: false,
        });
        self.index.insert(name.to_owned(), idx);
    }

    pub fn find(&self, name: &str) -> Option<&Cvar> {
        self.index.get(name).map(|&idx| &self.vars[idx])
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut Cvar> {
        match self.index.get(name) {
            Some(&idx) => Some(&mut self.vars[idx]),
            None => None,
        }
    }

    pub fn get_string(&self, name: &str) -> &str {
        match self.find(name) {
            Some(var) => &var.string,
            None => "",
        }
    }
}

impl CvarStore for CvarRegistry {
    fn get_value(&self, name: &str) -> f32 {
        match self.find(name) {
            Some(var) => var.value,
            None => 0.0,
        }
    }

    fn set_value(&mut self, name: &str, value: f32, source: CvarSource) {
        if self.find(name).is_none() {
            self.register(name, "", CvarFlags::empty());
        }
        let var = match self.find_mut(name) {
            Some(var) => var,
            None => return,
        };
        var.value = value;
        var.string = value_string(value);
        var.modified = true;
        if source == CvarSource::Archive {
            var.flags |= CvarFlags::ARCHIVE;
        }
        debug!("cvar {} = {}", var.name, var.string);
    }
}

// ============================================================
// Tests
// ============================================================
