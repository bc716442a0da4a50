use std::collections::BTreeMap;

use cadenza_api::common::stem::{Role, Stems};

use super::Id;
use crate::artifact;

/// Artifact names of a song's stems. Roles without a file are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StemSet(BTreeMap<Role, String>);

impl StemSet {
    pub fn get(&self, role: Role) -> Option<&str> {
        self.0.get(&role).map(String::as_str)
    }

    pub fn insert(&mut self, role: Role, name: String) {
        if !name.is_empty() {
            self.0.insert(role, name);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Role, &str)> {
        self.0.iter().map(|(role, name)| (*role, name.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.values().map(String::as_str)
    }

    pub fn transport(&self, song: Id, prefix: &str) -> Stems {
        self.iter()
            .map(|(role, name)| {
                (role, artifact::Path { song, name: name.to_owned() }.transport(prefix))
            })
            .collect()
    }
}

impl FromIterator<(Role, String)> for StemSet {
    fn from_iter<T: IntoIterator<Item = (Role, String)>>(iter: T) -> Self {
        let mut stems = Self::default();
        for (role, name) in iter {
            stems.insert(role, name);
        }
        stems
    }
}
