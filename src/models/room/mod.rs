// Room module
// A physical or virtual track, rendered as one grid column

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    #[default]
    #[serde(alias = "TALK")]
    Talk,
    #[serde(alias = "TRAINING")]
    Training,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub room_type: RoomType,
}

impl Room {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            room_type: RoomType::Talk,
        }
    }
}

/// Room reference as carried by a schedule item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomRef {
    pub id: String,
}

impl From<&Room> for RoomRef {
    fn from(room: &Room) -> Self {
        Self { id: room.id.clone() }
    }
}
