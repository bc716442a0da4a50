use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, NoneAsEmptyString, serde_as};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Soprano,
    Alto,
    Tenor,
    Instrumental,
}

/// Role to transport path mapping. Absent roles travel as empty strings.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stems {
    #[serde(default)]
    #[serde_as(as = "DefaultOnNull<NoneAsEmptyString>")]
    pub soprano: Option<String>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnNull<NoneAsEmptyString>")]
    pub alto: Option<String>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnNull<NoneAsEmptyString>")]
    pub tenor: Option<String>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnNull<NoneAsEmptyString>")]
    pub instrumental: Option<String>,
}

impl Stems {
    pub fn get(&self, role: Role) -> Option<&str> {
        match role {
            Role::Soprano => self.soprano.as_deref(),
            Role::Alto => self.alto.as_deref(),
            Role::Tenor => self.tenor.as_deref(),
            Role::Instrumental => self.instrumental.as_deref(),
        }
    }

    pub fn set(&mut self, role: Role, path: Option<String>) {
        let slot = match role {
            Role::Soprano => &mut self.soprano,
            Role::Alto => &mut self.alto,
            Role::Tenor => &mut self.tenor,
            Role::Instrumental => &mut self.instrumental,
        };
        *slot = path.filter(|path| !path.is_empty());
    }

    pub fn iter(&self) -> impl Iterator<Item = (Role, &str)> {
        Role::iter().filter_map(|role| self.get(role).map(|path| (role, path)))
    }
}

impl FromIterator<(Role, String)> for Stems {
    fn from_iter<T: IntoIterator<Item = (Role, String)>>(iter: T) -> Self {
        let mut stems = Self::default();
        for (role, path) in iter {
            stems.set(role, Some(path));
        }
        stems
    }
}
