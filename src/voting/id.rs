use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier for polls, votes and users.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Id(pub Uuid);
impl Id {
    pub fn new() -> Id {
        Id(Uuid::new_v4())
    }
}
impl Default for Id {
    fn default() -> Id {
        Id::new()
    }
}
impl Display for Id {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Positional identifier of an option within its poll. Votes reference
/// options by this index, so it is only meaningful next to the poll's
/// current option list.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct WeakId(pub u32);
impl WeakId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}
impl Display for WeakId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl PartialEq<u32> for WeakId {
    fn eq(&self, other: &u32) -> bool {
        self.0 == *other
    }
}
