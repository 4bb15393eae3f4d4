use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub deleted_count: u64,
}

#[derive(Serialize)]
pub struct SignupResponse {
    pub username: String,
}

/// Frame sent over `/socket`.
#[derive(Serialize)]
pub struct SocketMessage<'a, T: Serialize> {
    pub event: &'a str,
    pub data: &'a T,
}
