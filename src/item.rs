use itertools::Itertools;
use std::fmt;

#[derive(Copy, Clone, Hash, PartialOrd, PartialEq, Eq, Ord, Debug)]
pub struct Item {
    id: u32,
}

impl Item {
    pub fn null() -> Item {
        Item { id: 0 }
    }
    pub fn with_id(id: u32) -> Item {
        Item { id: id }
    }
    pub fn id(&self) -> u32 {
        self.id
    }
    pub fn is_null(&self) -> bool {
        self.id == 0
    }
    pub fn item_vec_to_string(items: &[Item]) -> String {
        items.iter().join(" ")
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
