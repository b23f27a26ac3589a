//! 値オブジェクト
//!
//! 生成時に検証され、以後は不変。外部（認証・アップロード担当）から渡された
//! 文字列はここで初めてドメインの型になる。

use std::fmt;

use uuid::Uuid;

use super::error::ValueObjectError;

/// Username の最大長（バイト）
pub const USERNAME_MAX_LEN: usize = 64;
/// RoomId の最大長（バイト）
pub const ROOM_ID_MAX_LEN: usize = 128;
/// MessageBody の最大長（バイト）。HTML 本文やメディア参照を含むため余裕を持たせる
pub const MESSAGE_BODY_MAX_LEN: usize = 16 * 1024;

fn validate(field: &'static str, value: &str, max: usize) -> Result<(), ValueObjectError> {
    if value.trim().is_empty() {
        return Err(ValueObjectError::Empty { field });
    }
    validate_len(field, value, max)
}

fn validate_len(field: &'static str, value: &str, max: usize) -> Result<(), ValueObjectError> {
    if value.len() > max {
        return Err(ValueObjectError::TooLong {
            field,
            max,
            actual: value.len(),
        });
    }
    Ok(())
}

/// 認証済みユーザー名
///
/// 認証は外部の責務。コアは渡されたユーザー名をそのまま信頼する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Username(String);

impl Username {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        validate("username", &value, USERNAME_MAX_LEN)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Username {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Room の識別子（呼び出し側が指定する不透明な文字列）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        validate("room id", &value, ROOM_ID_MAX_LEN)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// メッセージ本文
///
/// テキスト、HTML、またはアップロード済みメディアへの参照（パス / URL）。
/// 中身は解釈も変換もしない。空白だけの本文もそのまま受け付け、長さだけを制限する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBody(String);

impl MessageBody {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        validate_len("message body", &value, MESSAGE_BODY_MAX_LEN)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageBody {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// 接続ごとに払い出される識別トークン
///
/// Presence の削除は、登録時と同じトークンを持つ接続からのみ有効。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unix タイムスタンプ（UTC, ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
