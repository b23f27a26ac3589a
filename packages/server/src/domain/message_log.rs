//! Message Log: Room ごとの到着順メッセージバッファ

use std::collections::VecDeque;

use super::ChatMessage;

/// 到着順に並んだメッセージ履歴
///
/// `limit` 件を超えると最も古いメッセージから捨てる。残った履歴の順序は保たれる。
#[derive(Debug, Clone)]
pub struct MessageLog {
    messages: VecDeque<ChatMessage>,
    limit: usize,
}

impl MessageLog {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            messages: VecDeque::new(),
            limit,
        }
    }

    pub fn append(&mut self, message: ChatMessage) {
        if self.limit == 0 {
            return;
        }
        while self.messages.len() >= self.limit {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }

    /// リプレイ用に履歴を複製する
    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.messages.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
