use {
  dashmap::DashMap,
  poise::serenity_prelude::{
    ChannelId,
    MessageId,
    UserId
  },
  std::sync::Arc
};

#[derive(Clone, Copy, PartialEq)]
pub enum SessionKind {
  Shift,
  Training
}

impl SessionKind {
  pub fn label(&self) -> &'static str {
    match self {
      Self::Shift => "Shift",
      Self::Training => "Training"
    }
  }
}

/// One announced shift/training, kept until a host ends or cancels it.
/// Sessions only live in memory; a restart drops the board.
#[derive(Clone)]
pub struct Session {
  pub kind:    SessionKind,
  pub host:    UserId,
  pub starts:  i64,
  pub ends:    i64,
  pub channel: ChannelId,
  pub message: MessageId
}

#[derive(Clone)]
pub struct SessionBoard(Arc<DashMap<String, Session>>);

impl SessionBoard {
  pub fn new() -> Self { Self(Arc::new(DashMap::new())) }

  pub fn insert(
    &self,
    id: String,
    session: Session
  ) {
    self.0.insert(id, session);
  }

  pub fn get(
    &self,
    id: &str
  ) -> Option<Session> {
    self.0.get(id).map(|session| session.value().clone())
  }

  pub fn remove(
    &self,
    id: &str
  ) -> Option<Session> {
    self.0.remove(id).map(|(_, session)| session)
  }
}
