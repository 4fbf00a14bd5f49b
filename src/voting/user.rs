use serde::Serialize;

use super::id::Id;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Role {
    Member,
    Admin,
}

/// The caller as vouched for by the fronting identity provider. Built once
/// per request at the edge and threaded explicitly into every operation that
/// needs it; nothing in here comes from a request body.
#[derive(Clone, Debug, Serialize)]
pub struct Identity {
    pub user_id: Id,
    pub role: Role,
}

impl Identity {
    pub const fn new(user_id: Id, role: Role) -> Identity {
        Identity { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
