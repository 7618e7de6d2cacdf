use strum::{AsRefStr, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Book,
    OwnRooms,
    Administer,
}

impl Role {
    pub fn capabilities(self) -> &'static [Capability] {
        match self {
            Role::User => &[Capability::Book, Capability::OwnRooms],
            Role::Admin => &[Capability::Administer],
        }
    }

    pub fn has(self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}
