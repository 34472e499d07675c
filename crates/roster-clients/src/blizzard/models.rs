//! Battle.net API response shapes (only the fields reconciliation reads)

use serde::Deserialize;

use roster_core::{CharacterProfile, LinkedCharacter, RosterMember};

#[derive(Debug, Deserialize)]
pub(crate) struct RosterResponse {
    #[serde(default)]
    pub members: Vec<RosterEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RosterEntry {
    pub character: RosterCharacter,
    pub rank: i32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RosterCharacter {
    pub name: String,
    pub realm: RealmRef,
    #[serde(default)]
    pub level: i32,
    pub playable_class: Option<ClassRef>,
    pub equipped_item_level: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RealmRef {
    pub slug: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ClassRef {
    pub id: Option<i32>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NamedRef {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProfileResponse {
    pub character_class: Option<NamedRef>,
    pub active_spec: Option<NamedRef>,
    pub equipped_item_level: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AccountProfileResponse {
    #[serde(default)]
    pub wow_accounts: Vec<WowAccount>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WowAccount {
    #[serde(default)]
    pub characters: Vec<AccountCharacter>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AccountCharacter {
    pub name: String,
    pub realm: RealmRef,
}

/// Playable class names by Battle.net class id
fn class_name(id: i32) -> Option<&'static str> {
    Some(match id {
        1 => "Warrior",
        2 => "Paladin",
        3 => "Hunter",
        4 => "Rogue",
        5 => "Priest",
        6 => "Death Knight",
        7 => "Shaman",
        8 => "Mage",
        9 => "Warlock",
        10 => "Monk",
        11 => "Druid",
        12 => "Demon Hunter",
        13 => "Evoker",
        _ => return None,
    })
}

impl From<RosterEntry> for RosterMember {
    fn from(entry: RosterEntry) -> Self {
        let c = entry.character;
        // Roster entries usually carry only the class id
        let class = c.playable_class.and_then(|pc| {
            pc.name
                .or_else(|| pc.id.and_then(class_name).map(str::to_string))
        });

        RosterMember {
            name: c.name,
            realm: c.realm.slug,
            class,
            level: c.level,
            item_level: c.equipped_item_level,
            rank: entry.rank,
        }
    }
}

impl From<ProfileResponse> for CharacterProfile {
    fn from(p: ProfileResponse) -> Self {
        CharacterProfile {
            class: p.character_class.and_then(|c| c.name),
            active_spec: p.active_spec.and_then(|s| s.name),
            item_level: p.equipped_item_level,
        }
    }
}

impl AccountProfileResponse {
    pub fn into_linked(self) -> Vec<LinkedCharacter> {
        self.wow_accounts
            .into_iter()
            .flat_map(|a| a.characters)
            .map(|c| LinkedCharacter::new(c.name, c.realm.slug))
            .collect()
    }
}
