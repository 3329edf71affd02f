#![no_std]

//! # Simple Mafia
//!
//! A 5-player social-deduction game. Players stake a fixed entry fee to join;
//! when the 5th player joins, roles are dealt (2 Mafia, 3 Town) and the game
//! cycles through day and night phases until one side wins the pot.
//!
//! ## Game flow
//! 1. Up to 5 players `join`, each escrowing the 0.1-unit entry fee.
//! 2. On the 5th join the roles are shuffled and the first day begins.
//! 3. Day voting uses a **commit-reveal** protocol:
//!    a. Every living player commits `keccak256(target_address || salt)`.
//!    b. Once all have committed (or `force_day_tally` closes the window),
//!       each voter reveals their target + salt.
//!    c. When all committed voters have revealed (or `force_day_tally` is
//!       called again), the plurality target is eliminated. A tie for the
//!       highest count eliminates nobody. Unrevealed commitments abstain.
//! 4. At night each living Mafia member casts an open (Mafia-only) vote for
//!    a living Town target; `force_night_tally` resolves it the same way.
//! 5. After every elimination the win conditions are checked: Town wins when
//!    no Mafia remains, Mafia wins on reaching parity with Town. The pot is
//!    split evenly among the living members of the winning side.
//!
//! ## Liveness
//! The two force-tally entry points take no authorization at all. If a voter
//! stalls, anyone may close the sub-phase; a missing commitment or reveal
//! simply counts as an abstention. The game can never deadlock on one
//! unresponsive participant.
//!
//! ## Role secrecy
//! Roles are stored on-chain but only handed out via `get_my_role` (caller
//! auth required) while the game runs. `get_players` redacts the role vector
//! until the Ended phase, after which it is public record.

use soroban_sdk::{
    contract, contracterror, contractevent, contractimpl, contracttype, token, Address, Bytes,
    BytesN, Env, Map, Vec,
};

// ═══════════════════════════════════════════════════════════════════════════════
//  Contract Events
// ═══════════════════════════════════════════════════════════════════════════════

#[contractevent]
pub struct EvPlayerJoined {
    pub player: Address,
    pub player_index: u32,
}

#[contractevent]
pub struct EvGameStarted {}

#[contractevent]
pub struct EvPhaseChanged {
    pub new_phase: u32,
}

/// Emitted when a player commits their day vote (target is hidden).
#[contractevent]
pub struct EvVoteCommitted {
    pub voter: Address,
}

/// Emitted when a player reveals their day vote (target now visible).
#[contractevent]
pub struct EvVoteRevealed {
    pub voter: Address,
    pub target: Address,
}

#[contractevent]
pub struct EvNightVoteCast {
    pub voter: Address,
    pub target: Address,
}

/// Emitted on elimination. The role is revealed at this point — everyone
/// learns whether the lynch/kill hit Town or Mafia.
#[contractevent]
pub struct EvPlayerEliminated {
    pub player: Address,
    pub role: u32,
}

#[contractevent]
pub struct EvGameEnded {
    pub winner_side: u32,
    pub winners: Vec<Address>,
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Errors
// ═══════════════════════════════════════════════════════════════════════════════

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MafiaError {
    InvalidPhase = 1,
    NotAlive = 2,
    AlreadyActed = 3,
    RevealMismatch = 4,
    NoCommitment = 5,
    InvalidStake = 6,
    GameFull = 7,
    AlreadyJoined = 8,
    AlreadyStarted = 9,
    InvalidTarget = 10,
    NotAuthorized = 11,
    StakeTokenNotSet = 12,
    GameNotFound = 13,
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Phases & roles (compact u32 encoding, matches the public ABI)
// ═══════════════════════════════════════════════════════════════════════════════

pub(crate) type Phase = u32;

pub const PHASE_LOBBY: Phase = 0;
pub const PHASE_DAY_COMMIT: Phase = 1;
pub const PHASE_DAY_REVEAL: Phase = 2;
pub const PHASE_NIGHT: Phase = 3;
pub const PHASE_ENDED: Phase = 4;

pub(crate) type Role = u32;

pub const ROLE_TOWN: Role = 0;
pub const ROLE_MAFIA: Role = 1;

// ═══════════════════════════════════════════════════════════════════════════════
//  Game state & storage keys
// ═══════════════════════════════════════════════════════════════════════════════

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MafiaGame {
    /// Join order; fixed capacity of 5. Index into `alive` and `roles`.
    pub players: Vec<Address>,
    pub alive: Vec<bool>,
    /// Empty until the 5th join; assigned exactly once.
    pub roles: Vec<u32>,
    pub phase: u32,
    pub started: bool,
    /// Escrowed stake. Grows only on join, shrinks only at payout.
    pub pot: i128,
    // Day commit-reveal (cleared every day tally)
    pub day_commitments: Map<Address, BytesN<32>>,
    pub day_votes: Map<Address, Address>,
    // Night votes, Mafia only (cleared every night tally)
    pub night_votes: Map<Address, Address>,
    // Set at finalization
    pub winner_side: Option<u32>,
    pub winners: Vec<Address>,
}

/// Snapshot returned by `get_game_state` — what a front-end polls each tick.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GameStateView {
    pub phase: u32,
    pub player_count: u32,
    pub alive_count: u32,
    pub alive_mafia: u32,
    pub alive_town: u32,
    pub started: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlayersView {
    pub addrs: Vec<Address>,
    pub alive: Vec<bool>,
    /// Redacted (empty) until the game has ended.
    pub roles: Vec<u32>,
}

#[contracttype]
#[derive(Clone)]
enum DataKey {
    Game,
    StakeToken,
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Constants
// ═══════════════════════════════════════════════════════════════════════════════

/// 0.1 units at 7 decimals.
pub const ENTRY_FEE: i128 = 1_000_000;
pub const MAX_PLAYERS: u32 = 5;
pub const MAFIA_COUNT: u32 = 2;

// Ledger rate is approximately 5 seconds per ledger on Stellar
const LEDGER_RATE_SECS: u32 = 5;

// The finished game is permanent record (role reveal, payout proof), so the
// singleton lives in persistent storage with a long TTL bump on every write.
const TTL_SECONDS: u32 = 120 * 24 * 60 * 60; // 120 days
const GAME_TTL_LEDGERS: u32 = TTL_SECONDS / LEDGER_RATE_SECS;

// ═══════════════════════════════════════════════════════════════════════════════
//  Contract
// ═══════════════════════════════════════════════════════════════════════════════

#[contract]
pub struct MafiaContract;

#[contractimpl]
impl MafiaContract {
    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Constructor
    // ───────────────────────────────────────────────────────────────────────────

    pub fn __constructor(env: Env, stake_token: Address) {
        env.storage()
            .instance()
            .set(&DataKey::StakeToken, &stake_token);

        let game = MafiaGame {
            players: Vec::new(&env),
            alive: Vec::new(&env),
            roles: Vec::new(&env),
            phase: PHASE_LOBBY,
            started: false,
            pot: 0,
            day_commitments: Map::new(&env),
            day_votes: Map::new(&env),
            night_votes: Map::new(&env),
            winner_side: None,
            winners: Vec::new(&env),
        };
        Self::write_game(&env, &game);
    }

    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Registration
    // ───────────────────────────────────────────────────────────────────────────

    /// Join the lobby, escrowing exactly the entry fee. The 5th join starts
    /// the game: roles are dealt and the first day-commit phase opens.
    pub fn join(env: Env, player: Address, stake: i128) -> Result<(), MafiaError> {
        player.require_auth();

        let mut game = Self::read_game(&env)?;
        if game.players.len() >= MAX_PLAYERS {
            return Err(MafiaError::GameFull);
        }
        if game.phase != PHASE_LOBBY {
            return Err(MafiaError::AlreadyStarted);
        }
        if Self::find_player(&game, &player).is_some() {
            return Err(MafiaError::AlreadyJoined);
        }
        if stake != ENTRY_FEE {
            return Err(MafiaError::InvalidStake);
        }

        let token_addr = Self::load_stake_token(&env)?;
        let token_client = token::Client::new(&env, &token_addr);
        token_client.transfer(&player, &env.current_contract_address(), &stake);

        let player_index = game.players.len();
        game.players.push_back(player.clone());
        game.alive.push_back(true);
        game.pot += stake;

        EvPlayerJoined {
            player,
            player_index,
        }
        .publish(&env);

        if game.players.len() == MAX_PLAYERS {
            game.started = true;
            Self::assign_roles(&env, &mut game);
            game.phase = PHASE_DAY_COMMIT;
            EvGameStarted {}.publish(&env);
            EvPhaseChanged {
                new_phase: PHASE_DAY_COMMIT,
            }
            .publish(&env);
        }

        Self::write_game(&env, &game);
        Ok(())
    }

    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Day vote (commit-reveal)
    // ───────────────────────────────────────────────────────────────────────────

    /// Commit a day vote: `commitment = keccak256(target_address || salt)`.
    /// One commitment per living voter per cycle. When every living player
    /// has committed, the reveal phase opens.
    pub fn commit_day_vote(
        env: Env,
        voter: Address,
        commitment: BytesN<32>,
    ) -> Result<(), MafiaError> {
        voter.require_auth();

        let mut game = Self::read_game(&env)?;
        if game.phase != PHASE_DAY_COMMIT {
            return Err(MafiaError::InvalidPhase);
        }
        Self::require_alive(&game, &voter)?;
        if game.day_commitments.contains_key(voter.clone()) {
            return Err(MafiaError::AlreadyActed);
        }

        game.day_commitments.set(voter.clone(), commitment);

        EvVoteCommitted { voter }.publish(&env);

        if game.day_commitments.len() >= Self::alive_count(&game) {
            game.phase = PHASE_DAY_REVEAL;
            EvPhaseChanged {
                new_phase: PHASE_DAY_REVEAL,
            }
            .publish(&env);
        }

        Self::write_game(&env, &game);
        Ok(())
    }

    /// Reveal a previously committed day vote. The recomputed hash must
    /// match the stored commitment and the target must be a living player
    /// other than the voter. When every committed voter has revealed, the
    /// tally runs immediately.
    pub fn reveal_day_vote(
        env: Env,
        voter: Address,
        target: Address,
        salt: BytesN<32>,
    ) -> Result<(), MafiaError> {
        voter.require_auth();

        let mut game = Self::read_game(&env)?;
        if game.phase != PHASE_DAY_REVEAL {
            return Err(MafiaError::InvalidPhase);
        }
        Self::require_alive(&game, &voter)?;

        let commitment = game
            .day_commitments
            .get(voter.clone())
            .ok_or(MafiaError::NoCommitment)?;
        if game.day_votes.contains_key(voter.clone()) {
            return Err(MafiaError::AlreadyActed);
        }
        if Self::vote_commitment(&env, &target, &salt) != commitment {
            return Err(MafiaError::RevealMismatch);
        }

        let target_idx = Self::find_player(&game, &target).ok_or(MafiaError::InvalidTarget)?;
        if !game.alive.get(target_idx).unwrap() || target == voter {
            return Err(MafiaError::InvalidTarget);
        }

        game.day_votes.set(voter.clone(), target.clone());

        EvVoteRevealed { voter, target }.publish(&env);

        // All committed voters revealed → tally without waiting for a force call
        if game.day_votes.len() >= game.day_commitments.len() {
            Self::run_day_tally(&env, &mut game)?;
        }

        Self::write_game(&env, &game);
        Ok(())
    }

    /// Permissionless liveness escape for the day cycle. During day-commit
    /// it closes the commit window; during day-reveal it runs the tally,
    /// treating unrevealed commitments as abstentions.
    pub fn force_day_tally(env: Env) -> Result<(), MafiaError> {
        let mut game = Self::read_game(&env)?;
        match game.phase {
            PHASE_DAY_COMMIT => {
                game.phase = PHASE_DAY_REVEAL;
                EvPhaseChanged {
                    new_phase: PHASE_DAY_REVEAL,
                }
                .publish(&env);
            }
            PHASE_DAY_REVEAL => {
                Self::run_day_tally(&env, &mut game)?;
            }
            _ => return Err(MafiaError::InvalidPhase),
        }

        Self::write_game(&env, &game);
        Ok(())
    }

    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Night vote (Mafia only)
    // ───────────────────────────────────────────────────────────────────────────

    /// Cast (or change) a night kill vote. Only living Mafia may vote and
    /// only living Town members are valid targets. A repeat vote from the
    /// same member overwrites the earlier one.
    pub fn vote_night_kill(env: Env, voter: Address, target: Address) -> Result<(), MafiaError> {
        voter.require_auth();

        let mut game = Self::read_game(&env)?;
        if game.phase != PHASE_NIGHT {
            return Err(MafiaError::InvalidPhase);
        }
        let voter_idx = Self::require_alive(&game, &voter)?;
        if game.roles.get(voter_idx).unwrap() != ROLE_MAFIA {
            return Err(MafiaError::NotAuthorized);
        }

        let target_idx = Self::find_player(&game, &target).ok_or(MafiaError::InvalidTarget)?;
        if !game.alive.get(target_idx).unwrap()
            || game.roles.get(target_idx).unwrap() != ROLE_TOWN
        {
            return Err(MafiaError::InvalidTarget);
        }

        game.night_votes.set(voter.clone(), target.clone());

        EvNightVoteCast { voter, target }.publish(&env);

        Self::write_game(&env, &game);
        Ok(())
    }

    /// Permissionless night resolution: tallies the Mafia votes, eliminates
    /// the plurality target (ties and zero votes eliminate nobody), and
    /// advances to the next day unless a side has won.
    pub fn force_night_tally(env: Env) -> Result<(), MafiaError> {
        let mut game = Self::read_game(&env)?;
        if game.phase != PHASE_NIGHT {
            return Err(MafiaError::InvalidPhase);
        }

        if let Some(idx) = Self::plurality_target(&game, &game.night_votes) {
            Self::eliminate(&env, &mut game, idx);
        }
        game.night_votes = Map::new(&env);

        if let Some(side) = Self::winning_side(&game) {
            Self::finalize_game(&env, &mut game, side)?;
        } else {
            game.phase = PHASE_DAY_COMMIT;
            EvPhaseChanged {
                new_phase: PHASE_DAY_COMMIT,
            }
            .publish(&env);
        }

        Self::write_game(&env, &game);
        Ok(())
    }

    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Reads
    // ───────────────────────────────────────────────────────────────────────────

    pub fn get_game_state(env: Env) -> Result<GameStateView, MafiaError> {
        let game = Self::read_game(&env)?;
        Ok(GameStateView {
            phase: game.phase,
            player_count: game.players.len(),
            alive_count: Self::alive_count(&game),
            alive_mafia: Self::side_alive_count(&game, ROLE_MAFIA),
            alive_town: Self::side_alive_count(&game, ROLE_TOWN),
            started: game.started,
        })
    }

    /// Roster snapshot. Roles stay redacted (empty vector) until the game
    /// has ended, at which point they become public record.
    pub fn get_players(env: Env) -> Result<PlayersView, MafiaError> {
        let game = Self::read_game(&env)?;
        let roles = if game.phase == PHASE_ENDED {
            game.roles.clone()
        } else {
            Vec::new(&env)
        };
        Ok(PlayersView {
            addrs: game.players.clone(),
            alive: game.alive.clone(),
            roles,
        })
    }

    /// A participant's own role. Requires the caller's auth so an RPC query
    /// cannot read someone else's role mid-game.
    pub fn get_my_role(env: Env, player: Address) -> Result<u32, MafiaError> {
        player.require_auth();

        let game = Self::read_game(&env)?;
        if !game.started {
            return Err(MafiaError::NotAuthorized);
        }
        match Self::find_player(&game, &player) {
            Some(idx) => Ok(game.roles.get(idx).unwrap()),
            None => Err(MafiaError::NotAuthorized),
        }
    }

    /// Winner list, available once the game has ended.
    pub fn get_winners(env: Env) -> Result<Vec<Address>, MafiaError> {
        let game = Self::read_game(&env)?;
        if game.phase != PHASE_ENDED {
            return Err(MafiaError::InvalidPhase);
        }
        Ok(game.winners)
    }

    /// The winning side's role code, None until the game has ended.
    pub fn get_winner_side(env: Env) -> Result<Option<u32>, MafiaError> {
        Ok(Self::read_game(&env)?.winner_side)
    }

    pub fn get_entry_fee(_env: Env) -> i128 {
        ENTRY_FEE
    }

    pub fn get_max_players(_env: Env) -> u32 {
        MAX_PLAYERS
    }

    pub fn get_pot(env: Env) -> Result<i128, MafiaError> {
        Ok(Self::read_game(&env)?.pot)
    }

    pub fn get_stake_token(env: Env) -> Result<Address, MafiaError> {
        Self::load_stake_token(&env)
    }

    // ═══════════════════════════════════════════════════════════════════════════
    //  Internal: Role assignment
    // ═══════════════════════════════════════════════════════════════════════════

    /// Deal 2 Mafia / 3 Town by Fisher-Yates over the player indices.
    ///
    /// The PRNG seed hashes every joined address with the ledger sequence
    /// and timestamp of the 5th join, so no player can predict the deal
    /// before committing their stake.
    fn assign_roles(env: &Env, game: &mut MafiaGame) {
        let mut seed_data = Bytes::new(env);
        for p in game.players.iter() {
            seed_data.append(&p.to_string().to_bytes());
        }
        seed_data.append(&Bytes::from_array(env, &env.ledger().sequence().to_be_bytes()));
        seed_data.append(&Bytes::from_array(env, &env.ledger().timestamp().to_be_bytes()));
        let seed_hash = env.crypto().keccak256(&seed_data);
        env.prng().seed(seed_hash.into());

        let mut order: [u32; 5] = [0, 1, 2, 3, 4];
        let mut idx = MAX_PLAYERS;
        while idx > 1 {
            idx -= 1;
            let j = env.prng().gen_range::<u64>(0..=(idx as u64)) as u32;
            let tmp = order[idx as usize];
            order[idx as usize] = order[j as usize];
            order[j as usize] = tmp;
        }

        let mut roles = Vec::new(env);
        let mut i: u32 = 0;
        while i < MAX_PLAYERS {
            roles.push_back(ROLE_TOWN);
            i += 1;
        }
        let mut m: u32 = 0;
        while m < MAFIA_COUNT {
            roles.set(order[m as usize], ROLE_MAFIA);
            m += 1;
        }
        game.roles = roles;
    }

    // ═══════════════════════════════════════════════════════════════════════════
    //  Internal: Tallies & elimination
    // ═══════════════════════════════════════════════════════════════════════════

    /// Day vote commitment: `keccak256(target_address || salt)`.
    fn vote_commitment(env: &Env, target: &Address, salt: &BytesN<32>) -> BytesN<32> {
        let mut preimage = target.to_string().to_bytes();
        preimage.append(&Bytes::from_array(env, &salt.to_array()));
        env.crypto().keccak256(&preimage).into()
    }

    /// Count votes per living target and pick the strict plurality winner.
    /// Returns None on zero votes or a tie for the highest count.
    fn plurality_target(game: &MafiaGame, votes: &Map<Address, Address>) -> Option<u32> {
        let mut counts: [u32; 5] = [0; 5];
        for (_voter, target) in votes.iter() {
            if let Some(idx) = Self::find_player(game, &target) {
                if game.alive.get(idx).unwrap() {
                    counts[idx as usize] += 1;
                }
            }
        }

        let mut best: u32 = 0;
        let mut best_idx: Option<u32> = None;
        let mut tied = false;
        let mut i: u32 = 0;
        while i < MAX_PLAYERS {
            let c = counts[i as usize];
            if c > best {
                best = c;
                best_idx = Some(i);
                tied = false;
            } else if c == best && c > 0 {
                tied = true;
            }
            i += 1;
        }

        if tied {
            return None;
        }
        best_idx
    }

    fn eliminate(env: &Env, game: &mut MafiaGame, idx: u32) {
        game.alive.set(idx, false);
        EvPlayerEliminated {
            player: game.players.get(idx).unwrap(),
            role: game.roles.get(idx).unwrap(),
        }
        .publish(env);
    }

    /// Resolve the day tally, clear both vote maps, then move to night
    /// or finalize if a side has won.
    fn run_day_tally(env: &Env, game: &mut MafiaGame) -> Result<(), MafiaError> {
        if let Some(idx) = Self::plurality_target(game, &game.day_votes) {
            Self::eliminate(env, game, idx);
        }
        // Clear before the next cycle so stale votes can never carry over
        game.day_commitments = Map::new(env);
        game.day_votes = Map::new(env);

        if let Some(side) = Self::winning_side(game) {
            Self::finalize_game(env, game, side)?;
        } else {
            game.phase = PHASE_NIGHT;
            EvPhaseChanged {
                new_phase: PHASE_NIGHT,
            }
            .publish(env);
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════════
    //  Internal: Win evaluation & payout
    // ═══════════════════════════════════════════════════════════════════════════

    fn winning_side(game: &MafiaGame) -> Option<u32> {
        let mafia = Self::side_alive_count(game, ROLE_MAFIA);
        let town = Self::side_alive_count(game, ROLE_TOWN);
        if mafia == 0 {
            Some(ROLE_TOWN)
        } else if mafia >= town {
            Some(ROLE_MAFIA)
        } else {
            None
        }
    }

    /// Move to the absorbing Ended phase and split the pot evenly among the
    /// living members of the winning side. Integer-division dust stays in
    /// escrow.
    fn finalize_game(env: &Env, game: &mut MafiaGame, winner_side: u32) -> Result<(), MafiaError> {
        let winners = Self::living_side(env, game, winner_side);

        let n = winners.len();
        if n > 0 && game.pot > 0 {
            let share = game.pot / (n as i128);
            if share > 0 {
                let token_addr = Self::load_stake_token(env)?;
                let token_client = token::Client::new(env, &token_addr);
                let escrow = env.current_contract_address();
                for winner in winners.iter() {
                    token_client.transfer(&escrow, &winner, &share);
                }
                game.pot -= share * (n as i128);
            }
        }

        game.phase = PHASE_ENDED;
        game.winner_side = Some(winner_side);
        game.winners = winners.clone();

        EvGameEnded {
            winner_side,
            winners,
        }
        .publish(env);
        EvPhaseChanged {
            new_phase: PHASE_ENDED,
        }
        .publish(env);

        Ok(())
    }

    fn living_side(env: &Env, game: &MafiaGame, side: u32) -> Vec<Address> {
        let mut members = Vec::new(env);
        let mut i: u32 = 0;
        while i < game.players.len() {
            if game.alive.get(i).unwrap() && game.roles.get(i).unwrap() == side {
                members.push_back(game.players.get(i).unwrap());
            }
            i += 1;
        }
        members
    }

    // ═══════════════════════════════════════════════════════════════════════════
    //  Internal: Roster helpers
    // ═══════════════════════════════════════════════════════════════════════════

    fn find_player(game: &MafiaGame, who: &Address) -> Option<u32> {
        let mut i: u32 = 0;
        while i < game.players.len() {
            if game.players.get(i).unwrap() == *who {
                return Some(i);
            }
            i += 1;
        }
        None
    }

    /// Eliminated players and strangers are both rejected as actors.
    fn require_alive(game: &MafiaGame, who: &Address) -> Result<u32, MafiaError> {
        let idx = Self::find_player(game, who).ok_or(MafiaError::NotAlive)?;
        if !game.alive.get(idx).unwrap() {
            return Err(MafiaError::NotAlive);
        }
        Ok(idx)
    }

    fn alive_count(game: &MafiaGame) -> u32 {
        let mut count: u32 = 0;
        let mut i: u32 = 0;
        while i < game.alive.len() {
            if game.alive.get(i).unwrap() {
                count += 1;
            }
            i += 1;
        }
        count
    }

    fn side_alive_count(game: &MafiaGame, side: u32) -> u32 {
        let mut count: u32 = 0;
        let mut i: u32 = 0;
        while i < game.roles.len() {
            if game.alive.get(i).unwrap() && game.roles.get(i).unwrap() == side {
                count += 1;
            }
            i += 1;
        }
        count
    }

    // ═══════════════════════════════════════════════════════════════════════════
    //  Internal: Storage
    // ═══════════════════════════════════════════════════════════════════════════

    fn read_game(env: &Env) -> Result<MafiaGame, MafiaError> {
        env.storage()
            .persistent()
            .get(&DataKey::Game)
            .ok_or(MafiaError::GameNotFound)
    }

    fn write_game(env: &Env, game: &MafiaGame) {
        env.storage().persistent().set(&DataKey::Game, game);
        env.storage()
            .persistent()
            .extend_ttl(&DataKey::Game, GAME_TTL_LEDGERS, GAME_TTL_LEDGERS);
        // Keep instance storage (stake token address) alive alongside
        env.storage()
            .instance()
            .extend_ttl(GAME_TTL_LEDGERS, GAME_TTL_LEDGERS);
    }

    fn load_stake_token(env: &Env) -> Result<Address, MafiaError> {
        env.storage()
            .instance()
            .get(&DataKey::StakeToken)
            .ok_or(MafiaError::StakeTokenNotSet)
    }
}
