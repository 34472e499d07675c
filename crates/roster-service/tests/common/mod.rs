//! In-memory ports shared by the service tests
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use roster_core::{
    Character, CharacterLookup, CharacterProfile, CharacterRepository,
    CharacterSummary, CharacterUpsert, CombatRole, DomainError, Guild, GuildMembership,
    GuildRepository, GuildRole, GuildRoster, LinkedCharacter, MembershipRepository,
    ProfileSource, Region, RepoResult, RosterMember, RosterSource, SourceError, SourceResult,
    User, UserRepository, UNKNOWN,
};
use roster_service::{ServiceContext, ServiceContextBuilder, SyncSettings};

// ============================================================================
// Storage
// ============================================================================

#[derive(Default)]
struct StoreState {
    guilds: HashMap<Uuid, Guild>,
    characters: Vec<Character>,
    users: HashMap<Uuid, User>,
    memberships: HashMap<(Uuid, Uuid), GuildMembership>,
    failing_upserts: HashSet<String>,
}

/// All four repositories over one in-memory state
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
    placeholder_calls: AtomicUsize,
    min_rank_calls: AtomicUsize,
    min_rank_delay_ms: AtomicU64,
}

impl InMemoryStore {
    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap()
    }

    /// Make every upsert of this character name fail
    pub fn fail_upserts_for(&self, name: &str) {
        self.lock().failing_upserts.insert(name.to_lowercase());
    }

    pub fn characters(&self) -> Vec<Character> {
        let mut characters = self.lock().characters.clone();
        characters.sort_by(|a, b| a.name.cmp(&b.name));
        characters
    }

    pub fn character(&self, name: &str, realm: &str) -> Option<Character> {
        self.lock()
            .characters
            .iter()
            .find(|c| c.key().matches(name, realm))
            .cloned()
    }

    pub fn membership(&self, guild_id: Uuid, user_id: Uuid) -> Option<GuildMembership> {
        self.lock().memberships.get(&(guild_id, user_id)).cloned()
    }

    pub fn guild(&self, id: Uuid) -> Option<Guild> {
        self.lock().guilds.get(&id).cloned()
    }

    pub fn placeholder_calls(&self) -> usize {
        self.placeholder_calls.load(Ordering::SeqCst)
    }

    pub fn min_rank_calls(&self) -> usize {
        self.min_rank_calls.load(Ordering::SeqCst)
    }

    /// The next `min_rank_for_user` call sleeps between its read and its return
    pub fn delay_next_min_rank(&self, delay: Duration) {
        let millis = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self.min_rank_delay_ms.store(millis, Ordering::SeqCst);
    }

    pub fn insert_character(
        &self,
        guild_id: Uuid,
        name: &str,
        realm: &str,
        rank: i32,
        owner: Option<Uuid>,
    ) -> Character {
        let now = Utc::now();
        let character = Character {
            id: Uuid::new_v4(),
            guild_id,
            name: name.to_string(),
            realm: realm.to_string(),
            region: Region::Us,
            class: "Warrior".to_string(),
            spec: "Arms".to_string(),
            role: CombatRole::Dps,
            item_level: Some(600),
            level: 80,
            guild_rank: rank,
            avatar_url: None,
            user_id: owner,
            created_at: now,
            updated_at: now,
        };
        self.lock().characters.push(character.clone());
        character
    }
}

#[async_trait]
impl GuildRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Guild>> {
        Ok(self.lock().guilds.get(&id).cloned())
    }

    async fn find_by_identity(
        &self,
        region: Region,
        realm_slug: &str,
        slug: &str,
    ) -> RepoResult<Option<Guild>> {
        Ok(self
            .lock()
            .guilds
            .values()
            .find(|g| g.region == region && g.realm_slug == realm_slug && g.slug == slug)
            .cloned())
    }

    async fn create(&self, guild: &Guild) -> RepoResult<()> {
        let mut state = self.lock();
        let duplicate = state.guilds.values().any(|g| {
            g.region == guild.region && g.realm_slug == guild.realm_slug && g.slug == guild.slug
        });
        if duplicate {
            return Err(DomainError::GuildAlreadyTracked);
        }
        state.guilds.insert(guild.id, guild.clone());
        Ok(())
    }

    async fn update_links(&self, id: Uuid, wcl_guild_id: Option<i64>) -> RepoResult<()> {
        let mut state = self.lock();
        let guild = state
            .guilds
            .get_mut(&id)
            .ok_or(DomainError::GuildNotFound(id))?;
        guild.set_wcl_guild_id(wcl_guild_id);
        Ok(())
    }

    async fn mark_synced(&self, id: Uuid, at: DateTime<Utc>) -> RepoResult<()> {
        let mut state = self.lock();
        let guild = state
            .guilds
            .get_mut(&id)
            .ok_or(DomainError::GuildNotFound(id))?;
        guild.mark_synced(at);
        Ok(())
    }

    async fn list(&self, limit: i64, offset: i64) -> RepoResult<Vec<Guild>> {
        let mut guilds: Vec<Guild> = self.lock().guilds.values().cloned().collect();
        guilds.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(guilds
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }
}

#[async_trait]
impl CharacterRepository for InMemoryStore {
    async fn upsert(&self, upsert: &CharacterUpsert) -> RepoResult<Character> {
        let mut state = self.lock();
        if state.failing_upserts.contains(&upsert.key.name_key()) {
            return Err(DomainError::DatabaseError("connection reset".to_string()));
        }

        let now = Utc::now();
        if let Some(existing) = state.characters.iter_mut().find(|c| c.key() == upsert.key) {
            existing.guild_id = upsert.guild_id;
            existing.name = upsert.key.name.clone();
            existing.realm = upsert.key.realm.clone();
            if let Some(class) = &upsert.class {
                existing.class = class.clone();
            }
            existing.spec = upsert.spec.clone();
            existing.role = upsert.role;
            existing.item_level = upsert.item_level;
            existing.level = upsert.level;
            existing.guild_rank = upsert.guild_rank;
            existing.avatar_url = upsert.avatar_url.clone();
            existing.updated_at = now;
            return Ok(existing.clone());
        }

        let character = Character {
            id: Uuid::new_v4(),
            guild_id: upsert.guild_id,
            name: upsert.key.name.clone(),
            realm: upsert.key.realm.clone(),
            region: upsert.key.region,
            class: upsert.class.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            spec: upsert.spec.clone(),
            role: upsert.role,
            item_level: upsert.item_level,
            level: upsert.level,
            guild_rank: upsert.guild_rank,
            avatar_url: upsert.avatar_url.clone(),
            user_id: Some(upsert.default_owner),
            created_at: now,
            updated_at: now,
        };
        state.characters.push(character.clone());
        Ok(character)
    }

    async fn list_by_guild(&self, guild_id: Uuid) -> RepoResult<Vec<Character>> {
        let mut characters: Vec<Character> = self
            .lock()
            .characters
            .iter()
            .filter(|c| c.guild_id == guild_id)
            .cloned()
            .collect();
        characters.sort_by(|a, b| (a.guild_rank, &a.name).cmp(&(b.guild_rank, &b.name)));
        Ok(characters)
    }

    async fn find_claimable(
        &self,
        guild_id: Uuid,
        placeholder_id: Uuid,
        linked: &[LinkedCharacter],
    ) -> RepoResult<Vec<Character>> {
        Ok(self
            .lock()
            .characters
            .iter()
            .filter(|c| c.guild_id == guild_id)
            .filter(|c| c.user_id.is_none() || c.user_id == Some(placeholder_id))
            .filter(|c| linked.iter().any(|l| c.key().matches(&l.name, &l.realm)))
            .cloned()
            .collect())
    }

    async fn reassign_owner(
        &self,
        character_ids: &[Uuid],
        user_id: Uuid,
        placeholder_id: Uuid,
    ) -> RepoResult<u64> {
        let mut state = self.lock();
        let mut changed = 0;
        for character in state.characters.iter_mut() {
            let eligible = character.user_id.is_none() || character.user_id == Some(placeholder_id);
            if character_ids.contains(&character.id) && eligible {
                character.user_id = Some(user_id);
                character.updated_at = Utc::now();
                changed += 1;
            }
        }
        Ok(changed)
    }

    async fn min_rank_for_user(&self, guild_id: Uuid, user_id: Uuid) -> RepoResult<Option<i32>> {
        self.min_rank_calls.fetch_add(1, Ordering::SeqCst);
        let rank = self
            .lock()
            .characters
            .iter()
            .filter(|c| c.guild_id == guild_id && c.user_id == Some(user_id))
            .map(|c| c.guild_rank)
            .min();

        let delay = self.min_rank_delay_ms.swap(0, Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        Ok(rank)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>> {
        Ok(self.lock().users.get(&id).cloned())
    }

    async fn create(&self, user: &User) -> RepoResult<()> {
        self.lock().users.insert(user.id, user.clone());
        Ok(())
    }

    async fn get_or_create_placeholder(&self) -> RepoResult<User> {
        self.placeholder_calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.lock();
        if let Some(user) = state.users.values().find(|u| u.is_placeholder) {
            return Ok(user.clone());
        }
        let user = User::placeholder();
        state.users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl MembershipRepository for InMemoryStore {
    async fn find(&self, guild_id: Uuid, user_id: Uuid) -> RepoResult<Option<GuildMembership>> {
        Ok(self.lock().memberships.get(&(guild_id, user_id)).cloned())
    }

    async fn list_by_guild(&self, guild_id: Uuid) -> RepoResult<Vec<GuildMembership>> {
        Ok(self
            .lock()
            .memberships
            .values()
            .filter(|m| m.guild_id == guild_id)
            .cloned()
            .collect())
    }

    async fn upsert_role(
        &self,
        guild_id: Uuid,
        user_id: Uuid,
        role: GuildRole,
    ) -> RepoResult<GuildMembership> {
        let mut state = self.lock();
        let membership = state
            .memberships
            .entry((guild_id, user_id))
            .and_modify(|m| m.set_role(role))
            .or_insert_with(|| GuildMembership::new(guild_id, user_id, role));
        Ok(membership.clone())
    }
}

// ============================================================================
// External sources
// ============================================================================

/// Roster source returning a fixed roster or error
pub struct FakeRoster {
    result: Mutex<SourceResult<GuildRoster>>,
    calls: AtomicUsize,
}

impl Default for FakeRoster {
    fn default() -> Self {
        Self {
            result: Mutex::new(Ok(GuildRoster::default())),
            calls: AtomicUsize::new(0),
        }
    }
}

impl FakeRoster {
    pub fn set_members(&self, members: Vec<RosterMember>) {
        *self.result.lock().unwrap() = Ok(GuildRoster { members });
    }

    pub fn fail_with(&self, error: SourceError) {
        *self.result.lock().unwrap() = Err(error);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RosterSource for FakeRoster {
    async fn get_roster(&self, _: Region, _: &str, _: &str) -> SourceResult<GuildRoster> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.lock().unwrap().clone()
    }
}

/// Profile source keyed by lowercase character name
///
/// Unknown names answer `NotFound`. Every profile call yields for a few
/// milliseconds and records start/end events so tests can observe batching.
#[derive(Default)]
pub struct FakeProfiles {
    profiles: Mutex<HashMap<String, SourceResult<CharacterProfile>>>,
    accounts: Mutex<HashMap<String, SourceResult<Vec<LinkedCharacter>>>>,
    events: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeProfiles {
    pub fn set(&self, name: &str, result: SourceResult<CharacterProfile>) {
        self.profiles
            .lock()
            .unwrap()
            .insert(name.to_lowercase(), result);
    }

    pub fn set_account(&self, token: &str, result: SourceResult<Vec<LinkedCharacter>>) {
        self.accounts.lock().unwrap().insert(token.to_string(), result);
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileSource for FakeProfiles {
    async fn get_profile(
        &self,
        _: Region,
        _: &str,
        name: &str,
        _: Option<&str>,
    ) -> SourceResult<CharacterProfile> {
        self.events.lock().unwrap().push(format!("start:{name}"));
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(5)).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.events.lock().unwrap().push(format!("end:{name}"));

        self.profiles
            .lock()
            .unwrap()
            .get(&name.to_lowercase())
            .cloned()
            .unwrap_or(Err(SourceError::NotFound))
    }

    async fn get_account_characters(
        &self,
        _: Region,
        user_token: &str,
    ) -> SourceResult<Vec<LinkedCharacter>> {
        self.accounts
            .lock()
            .unwrap()
            .get(user_token)
            .cloned()
            .unwrap_or(Err(SourceError::Auth("unknown token".to_string())))
    }
}

/// Secondary lookup keyed by lowercase character name; unknown names are `Ok(None)`
#[derive(Default)]
pub struct FakeLookup {
    summaries: Mutex<HashMap<String, SourceResult<Option<CharacterSummary>>>>,
}

impl FakeLookup {
    pub fn set(&self, name: &str, result: SourceResult<Option<CharacterSummary>>) {
        self.summaries
            .lock()
            .unwrap()
            .insert(name.to_lowercase(), result);
    }
}

#[async_trait]
impl CharacterLookup for FakeLookup {
    async fn get_avatar_and_spec(
        &self,
        _: Region,
        _: &str,
        name: &str,
    ) -> SourceResult<Option<CharacterSummary>> {
        self.summaries
            .lock()
            .unwrap()
            .get(&name.to_lowercase())
            .cloned()
            .unwrap_or(Ok(None))
    }
}

// ============================================================================
// Harness
// ============================================================================

pub struct Harness {
    pub store: Arc<InMemoryStore>,
    pub roster: Arc<FakeRoster>,
    pub profiles: Arc<FakeProfiles>,
    pub lookup: Arc<FakeLookup>,
    pub ctx: ServiceContext,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_settings(SyncSettings::default())
    }

    pub fn with_settings(settings: SyncSettings) -> Self {
        let store = Arc::new(InMemoryStore::default());
        let roster = Arc::new(FakeRoster::default());
        let profiles = Arc::new(FakeProfiles::default());
        let lookup = Arc::new(FakeLookup::default());

        let ctx = ServiceContextBuilder::new()
            .guild_repo(store.clone())
            .character_repo(store.clone())
            .user_repo(store.clone())
            .membership_repo(store.clone())
            .roster_source(roster.clone())
            .profile_source(profiles.clone())
            .character_lookup(lookup.clone())
            .sync_settings(settings)
            .build()
            .unwrap();

        Self {
            store,
            roster,
            profiles,
            lookup,
            ctx,
        }
    }

    pub async fn user(&self, display_name: &str) -> User {
        let user = User::new(display_name.to_string(), None);
        UserRepository::create(self.store.as_ref(), &user).await.unwrap();
        user
    }

    pub async fn guild(&self) -> Guild {
        let guild = Guild::new(Region::Us, "Area 52".to_string(), "Night Shift".to_string());
        GuildRepository::create(self.store.as_ref(), &guild).await.unwrap();
        guild
    }

    pub async fn member_of(&self, guild: &Guild, user: &User, role: GuildRole) {
        self.store.upsert_role(guild.id, user.id, role).await.unwrap();
    }

    /// Guild plus an officer allowed to trigger syncs
    pub async fn guild_with_officer(&self) -> (Guild, User) {
        let guild = self.guild().await;
        let officer = self.user("Officer").await;
        self.member_of(&guild, &officer, GuildRole::Officer).await;
        (guild, officer)
    }

    pub async fn placeholder_id(&self) -> Uuid {
        self.ctx.placeholder_id().await.unwrap()
    }

    /// Both enrichment sources answer for `name`
    pub fn enrich(&self, name: &str, class: &str, spec: &str, item_level: i32) {
        self.profiles.set(
            name,
            Ok(CharacterProfile {
                class: Some(class.to_string()),
                active_spec: Some(spec.to_string()),
                item_level: Some(item_level),
            }),
        );
        self.lookup.set(
            name,
            Ok(Some(CharacterSummary {
                class: Some(class.to_string()),
                spec: Some(spec.to_string()),
                item_level: Some(item_level),
                avatar_url: Some(format!("https://render.example/{}.jpg", name.to_lowercase())),
            })),
        );
    }
}

pub fn member(name: &str, realm: &str, rank: i32) -> RosterMember {
    RosterMember {
        name: name.to_string(),
        realm: realm.to_string(),
        class: None,
        level: 80,
        item_level: None,
        rank,
    }
}

pub fn server_error() -> SourceError {
    SourceError::Status {
        status: 503,
        body: "unavailable".to_string(),
    }
}
