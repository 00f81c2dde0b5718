use crate::converter::Value;
use crate::enums::HttpMethod;
use bitflags::bitflags;
use std::collections::HashMap;
use std::fmt;

pub type Variables = HashMap<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleId(pub(crate) u32);

impl RuleId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MethodSet: u16 {
        const GET = 1 << 0;
        const POST = 1 << 1;
        const PUT = 1 << 2;
        const DELETE = 1 << 3;
        const PATCH = 1 << 4;
        const HEAD = 1 << 5;
        const OPTIONS = 1 << 6;
        const TRACE = 1 << 7;
        const CONNECT = 1 << 8;
    }
}

impl MethodSet {
    #[inline]
    pub fn from_method(method: HttpMethod) -> Self {
        Self::from_bits_retain(1 << (method as u16))
    }

    #[inline]
    pub fn contains_method(&self, method: HttpMethod) -> bool {
        self.contains(Self::from_method(method))
    }

    pub fn insert_method(&mut self, method: HttpMethod) {
        self.insert(Self::from_method(method));
    }

    pub fn methods(&self) -> impl Iterator<Item = HttpMethod> + '_ {
        HttpMethod::ALL
            .into_iter()
            .filter(move |method| self.contains_method(*method))
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.methods().map(HttpMethod::as_str).collect()
    }
}

impl FromIterator<HttpMethod> for MethodSet {
    fn from_iter<I: IntoIterator<Item = HttpMethod>>(iter: I) -> Self {
        let mut set = MethodSet::empty();
        for method in iter {
            set.insert_method(method);
        }
        set
    }
}

impl From<HttpMethod> for MethodSet {
    fn from(method: HttpMethod) -> Self {
        MethodSet::from_method(method)
    }
}

impl fmt::Display for MethodSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names().join(", "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MapId(pub(crate) u64);

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "map#{}", self.0)
    }
}
