use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;

use super::{
    ConversationRepository, RecordRepository, RepositoryError, Sequenced, UserRepository,
};
use crate::models::{ConversationMessage, GoalRecord, PersonaKind, Sender, UserAccount, WorkoutRecord};

type Sequences<T> = RwLock<HashMap<String, Vec<T>>>;

/// Process-memory store backing every repository trait. Each write takes the
/// relevant lock, so id assignment is serialized per collection.
#[derive(Default)]
pub struct InMemoryStore {
    users: RwLock<HashMap<String, UserAccount>>,
    workouts: Sequences<WorkoutRecord>,
    goals: Sequences<GoalRecord>,
    conversations: RwLock<HashMap<(String, PersonaKind), Vec<ConversationMessage>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn next_id_in<T>(records: Option<&Vec<T>>) -> u64 {
    records.map(|r| r.len() as u64).unwrap_or(0) + 1
}

fn list_in<T: Clone>(store: &Sequences<T>, username: &str) -> Result<Vec<T>, RepositoryError> {
    let map = store.read().map_err(|_| RepositoryError::LockPoisoned)?;
    Ok(map.get(username).cloned().unwrap_or_default())
}

fn append_in<T: Sequenced>(
    store: &Sequences<T>,
    username: &str,
    mut record: T,
) -> Result<T, RepositoryError> {
    let mut map = store.write().map_err(|_| RepositoryError::LockPoisoned)?;
    let records = map.entry(username.to_string()).or_default();
    record.assign_id(records.len() as u64 + 1);
    records.push(record.clone());
    Ok(record)
}

fn next_id_of<T>(store: &Sequences<T>, username: &str) -> Result<u64, RepositoryError> {
    let map = store.read().map_err(|_| RepositoryError::LockPoisoned)?;
    Ok(next_id_in(map.get(username)))
}

impl UserRepository for InMemoryStore {
    fn get(&self, username: &str) -> Result<Option<UserAccount>, RepositoryError> {
        let users = self.users.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(users.get(username).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, RepositoryError> {
        let users = self.users.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(users.values().find(|user| user.email == email).cloned())
    }

    fn insert(&self, account: UserAccount) -> Result<(), RepositoryError> {
        let mut users = self.users.write().map_err(|_| RepositoryError::LockPoisoned)?;

        if users.contains_key(&account.username) {
            return Err(RepositoryError::UsernameTaken);
        }
        if users.values().any(|user| user.email == account.email) {
            return Err(RepositoryError::EmailTaken);
        }

        users.insert(account.username.clone(), account);
        Ok(())
    }

    fn update(&self, account: UserAccount) -> Result<(), RepositoryError> {
        let mut users = self.users.write().map_err(|_| RepositoryError::LockPoisoned)?;

        if users
            .values()
            .any(|user| user.username != account.username && user.email == account.email)
        {
            return Err(RepositoryError::EmailTaken);
        }

        match users.get_mut(&account.username) {
            Some(existing) => {
                *existing = account;
                Ok(())
            }
            None => Err(RepositoryError::NotFound(account.username)),
        }
    }
}

impl RecordRepository<WorkoutRecord> for InMemoryStore {
    fn list(&self, username: &str) -> Result<Vec<WorkoutRecord>, RepositoryError> {
        list_in(&self.workouts, username)
    }

    fn append(&self, username: &str, record: WorkoutRecord) -> Result<WorkoutRecord, RepositoryError> {
        append_in(&self.workouts, username, record)
    }

    fn next_id(&self, username: &str) -> Result<u64, RepositoryError> {
        next_id_of(&self.workouts, username)
    }
}

impl RecordRepository<GoalRecord> for InMemoryStore {
    fn list(&self, username: &str) -> Result<Vec<GoalRecord>, RepositoryError> {
        list_in(&self.goals, username)
    }

    fn append(&self, username: &str, record: GoalRecord) -> Result<GoalRecord, RepositoryError> {
        append_in(&self.goals, username, record)
    }

    fn next_id(&self, username: &str) -> Result<u64, RepositoryError> {
        next_id_of(&self.goals, username)
    }
}

impl ConversationRepository for InMemoryStore {
    fn list(
        &self,
        username: &str,
        persona: PersonaKind,
    ) -> Result<Vec<ConversationMessage>, RepositoryError> {
        let conversations = self
            .conversations
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(conversations
            .get(&(username.to_string(), persona))
            .cloned()
            .unwrap_or_default())
    }

    fn append_exchange(
        &self,
        username: &str,
        persona: PersonaKind,
        user_message: String,
        reply: String,
    ) -> Result<(ConversationMessage, ConversationMessage), RepositoryError> {
        let mut conversations = self
            .conversations
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let log = conversations
            .entry((username.to_string(), persona))
            .or_default();

        let timestamp = Utc::now();
        let asked = ConversationMessage {
            id: log.len() as u64 + 1,
            message: user_message,
            sender: Sender::User,
            timestamp,
        };
        let answered = ConversationMessage {
            id: asked.id + 1,
            message: reply,
            sender: Sender::Ai,
            timestamp,
        };
        log.push(asked.clone());
        log.push(answered.clone());
        Ok((asked, answered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserProfile;
    use assert_matches::assert_matches;
    use std::sync::Arc;
    use std::thread;

    fn account(username: &str, email: &str) -> UserAccount {
        UserAccount {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            profile: UserProfile::default(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn workout(kind: &str) -> WorkoutRecord {
        WorkoutRecord {
            id: 0,
            workout_type: kind.to_string(),
            duration_minutes: 30.0,
            calories_burned: 120.0,
            exercises: vec![],
            notes: String::new(),
            date: Utc::now(),
        }
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let store = InMemoryStore::new();
        store.insert(account("user1", "a@example.com")).unwrap();

        assert_matches!(
            store.insert(account("user1", "b@example.com")),
            Err(RepositoryError::UsernameTaken)
        );
        assert_matches!(
            store.insert(account("user2", "a@example.com")),
            Err(RepositoryError::EmailTaken)
        );
        assert!(store.find_by_email("a@example.com").unwrap().is_some());
    }

    #[test]
    fn test_update_missing_user() {
        let store = InMemoryStore::new();
        assert_matches!(
            store.update(account("ghost", "g@example.com")),
            Err(RepositoryError::NotFound(name)) if name == "ghost"
        );
    }

    #[test]
    fn test_append_assigns_increasing_ids() {
        let store = InMemoryStore::new();
        assert_eq!(RecordRepository::<WorkoutRecord>::next_id(&store, "user1").unwrap(), 1);

        let first = RecordRepository::append(&store, "user1", workout("cardio")).unwrap();
        let second = RecordRepository::append(&store, "user1", workout("strength")).unwrap();
        let other = RecordRepository::append(&store, "user2", workout("yoga")).unwrap();

        assert_eq!((first.id, second.id, other.id), (1, 2, 1));
        assert_eq!(RecordRepository::<WorkoutRecord>::next_id(&store, "user1").unwrap(), 3);
        let listed: Vec<WorkoutRecord> = RecordRepository::list(&store, "user1").unwrap();
        assert_eq!(listed.iter().map(|w| w.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_concurrent_appends_keep_ids_unique() {
        let store = Arc::new(InMemoryStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..25 {
                        RecordRepository::append(store.as_ref(), "user1", workout("cardio")).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let listed: Vec<WorkoutRecord> = RecordRepository::list(store.as_ref(), "user1").unwrap();
        let ids: Vec<u64> = listed.iter().map(|w| w.id).collect();
        assert_eq!(ids, (1..=200).collect::<Vec<u64>>());
    }

    #[test]
    fn test_conversations_are_split_by_persona() {
        let store = InMemoryStore::new();
        let (asked, reply) = store
            .append_exchange(
                "user1",
                PersonaKind::FitnessTrainer,
                "hi".to_string(),
                "hello".to_string(),
            )
            .unwrap();

        assert_eq!((asked.id, reply.id), (1, 2));
        assert_eq!(reply.sender, Sender::Ai);
        assert_eq!(
            ConversationRepository::list(&store, "user1", PersonaKind::FitnessTrainer)
                .unwrap()
                .len(),
            2
        );
        assert!(ConversationRepository::list(&store, "user1", PersonaKind::Nutritionist)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_concurrent_exchanges_stay_adjacent() {
        let store = Arc::new(InMemoryStore::new());
        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for turn in 0..25 {
                        let (asked, reply) = store
                            .append_exchange(
                                "user1",
                                PersonaKind::Nutritionist,
                                format!("q-{worker}-{turn}"),
                                format!("a-{worker}-{turn}"),
                            )
                            .unwrap();
                        assert_eq!(reply.id, asked.id + 1);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let log = ConversationRepository::list(store.as_ref(), "user1", PersonaKind::Nutritionist)
            .unwrap();
        assert_eq!(log.len(), 400);
        for (index, pair) in log.chunks(2).enumerate() {
            assert_eq!(pair[0].id, index as u64 * 2 + 1);
            assert_eq!(pair[0].sender, Sender::User);
            assert_eq!(pair[1].sender, Sender::Ai);
            assert_eq!(pair[1].message, pair[0].message.replacen('q', "a", 1));
        }
    }
}
