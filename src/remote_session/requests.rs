use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "requestType", rename_all = "camelCase")]
pub enum SessionRequest {
    RemoteState,
    ResizeVideo { width: u32, height: u32 },
    RequestVideo,
    NextFrame,
    MouseEvent(MouseEvent),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MouseEvent {
    #[serde(rename = "posX")]
    pub pos_x: i32,
    #[serde(rename = "posY")]
    pub pos_y: i32,
    #[serde(rename = "eventType")]
    pub event_type: String,
    #[serde(rename = "deltaX")]
    pub delta_x: i32,
    #[serde(rename = "deltaY")]
    pub delta_y: i32,
    #[serde(rename = "deltaZ")]
    pub delta_z: i32,
    #[serde(rename = "deltaMode")]
    pub delta_mode: i32,
    #[serde(rename = "ctrlKey")]
    pub ctrl_key: bool,
}

impl MouseEvent {
    /// Vertical wheel step at a fixed point of the remote view.
    pub fn wheel(pos_x: i32, pos_y: i32, delta: i32) -> MouseEvent {
        MouseEvent {
            pos_x,
            pos_y,
            event_type: String::from("wheel"),
            delta_x: 1,
            delta_y: delta,
            delta_z: 0,
            delta_mode: 0,
            ctrl_key: false,
        }
    }
}

impl SessionRequest {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
