use hashbrown::HashMap as FastHashMap;

use super::args::ConverterArgs;
use super::builtin::{
    AnyConverter, FloatConverter, IntegerConverter, PathConverter, StringConverter, UuidConverter,
};
use super::{Converter, ConverterResult};

pub type ConverterFactory = fn(&ConverterArgs) -> ConverterResult<Converter>;

pub const DEFAULT_CONVERTER: &str = "default";

#[derive(Debug, Clone)]
pub struct ConverterRegistry {
    factories: FastHashMap<Box<str>, ConverterFactory>,
}

impl ConverterRegistry {
    pub fn empty() -> Self {
        Self {
            factories: FastHashMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(AnyConverter::NAME, AnyConverter::from_args);
        registry.register(DEFAULT_CONVERTER, StringConverter::from_args);
        registry.register(FloatConverter::NAME, FloatConverter::from_args);
        registry.register(IntegerConverter::NAME, IntegerConverter::from_args);
        registry.register(PathConverter::NAME, PathConverter::from_args);
        registry.register(StringConverter::NAME, StringConverter::from_args);
        registry.register(UuidConverter::NAME, UuidConverter::from_args);
        registry
    }

    /// Registers `factory` under `name`, returning the factory it replaced.
    pub fn register<S: Into<Box<str>>>(
        &mut self,
        name: S,
        factory: ConverterFactory,
    ) -> Option<ConverterFactory> {
        let name = name.into();
        tracing::event!(tracing::Level::DEBUG, converter = %name, "converter registered");
        self.factories.insert(name, factory)
    }

    pub fn lookup(&self, name: &str) -> Option<ConverterFactory> {
        self.factories.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(|name| name.as_ref())
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
