//! Result recorder
//!
//! The single entry point for anything that changes recorded results or
//! the standings derived from them. All mutations take an internal
//! write lock and run inside one transaction, so standings can never
//! observe a half-applied scoreline and two concurrent submissions
//! cannot interleave their read-modify-write cycles.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::data::SqliteService;
use crate::data::sqlite::SqliteError;
use crate::data::sqlite::repositories::{fixture, result, standing};
use crate::data::types::{FixtureRow, ResultRow};

use super::scoring::{ScoringRule, StandingDelta, winner_of};

pub struct ResultRecorder {
    db: Arc<SqliteService>,
    rule: ScoringRule,
    write_lock: Mutex<()>,
}

impl ResultRecorder {
    pub fn new(db: Arc<SqliteService>, rule: ScoringRule) -> Self {
        Self {
            db,
            rule,
            write_lock: Mutex::new(()),
        }
    }

    pub fn rule(&self) -> &ScoringRule {
        &self.rule
    }

    async fn load_fixture(&self, fixture_id: i64) -> Result<FixtureRow, SqliteError> {
        fixture::get_fixture(self.db.pool(), fixture_id)
            .await?
            .ok_or(SqliteError::not_found("fixture", fixture_id))
    }

    fn participants(fx: &FixtureRow) -> Result<(i64, i64), SqliteError> {
        match (fx.team1.team_id(), fx.team2.team_id()) {
            (Some(t1), Some(t2)) => Ok((t1, t2)),
            _ => Err(SqliteError::validation(format!(
                "fixture {} still has an unresolved participant",
                fx.id
            ))),
        }
    }

    fn check_scores(team1_score: i64, team2_score: i64) -> Result<(), SqliteError> {
        if team1_score < 0 || team2_score < 0 {
            return Err(SqliteError::validation("scores cannot be negative"));
        }
        Ok(())
    }

    /// Record the final score of a fixture
    ///
    /// Marks the fixture completed and, for pool fixtures, feeds both
    /// teams' standings in the same transaction.
    pub async fn record_result(
        &self,
        fixture_id: i64,
        team1_score: i64,
        team2_score: i64,
        summary: Option<&str>,
    ) -> Result<ResultRow, SqliteError> {
        Self::check_scores(team1_score, team2_score)?;
        let _guard = self.write_lock.lock().await;

        let fx = self.load_fixture(fixture_id).await?;
        if result::get_by_fixture(self.db.pool(), fixture_id)
            .await?
            .is_some()
        {
            return Err(SqliteError::conflict(format!(
                "fixture {} already has a result",
                fixture_id
            )));
        }
        let (t1, t2) = Self::participants(&fx)?;
        let winner = winner_of(t1, t2, team1_score, team2_score);

        let mut tx = self.db.pool().begin().await?;
        result::insert(&mut *tx, fixture_id, team1_score, team2_score, winner, summary).await?;
        fixture::set_outcome(&mut *tx, fixture_id, winner, true).await?;
        if let Some(pool_id) = fx.pool_id {
            let (d1, d2) = StandingDelta::from_scores(team1_score, team2_score);
            standing::apply_delta(&mut *tx, fx.edition_id, pool_id, &fx.category, t1, &d1, &self.rule).await?;
            standing::apply_delta(&mut *tx, fx.edition_id, pool_id, &fx.category, t2, &d2, &self.rule).await?;
        }
        tx.commit().await?;

        tracing::debug!(fixture_id, team1_score, team2_score, "Result recorded");
        result::get_by_fixture(self.db.pool(), fixture_id)
            .await?
            .ok_or(SqliteError::not_found("result", fixture_id))
    }

    /// Correct an already recorded score
    ///
    /// The old scoreline's standings contribution is reversed and the
    /// new one applied atomically, so totals stay consistent no matter
    /// how often a result is corrected.
    pub async fn update_result(
        &self,
        fixture_id: i64,
        team1_score: i64,
        team2_score: i64,
        summary: Option<&str>,
    ) -> Result<ResultRow, SqliteError> {
        Self::check_scores(team1_score, team2_score)?;
        let _guard = self.write_lock.lock().await;

        let fx = self.load_fixture(fixture_id).await?;
        let old = result::get_by_fixture(self.db.pool(), fixture_id)
            .await?
            .ok_or(SqliteError::not_found("result", fixture_id))?;
        let (t1, t2) = Self::participants(&fx)?;
        let winner = winner_of(t1, t2, team1_score, team2_score);

        let mut tx = self.db.pool().begin().await?;
        result::update(&mut *tx, fixture_id, team1_score, team2_score, winner, summary).await?;
        fixture::set_outcome(&mut *tx, fixture_id, winner, true).await?;
        if let Some(pool_id) = fx.pool_id {
            let (old1, old2) = StandingDelta::from_scores(old.team1_score, old.team2_score);
            let (new1, new2) = StandingDelta::from_scores(team1_score, team2_score);
            standing::apply_delta(&mut *tx, fx.edition_id, pool_id, &fx.category, t1, &old1.neg(), &self.rule).await?;
            standing::apply_delta(&mut *tx, fx.edition_id, pool_id, &fx.category, t2, &old2.neg(), &self.rule).await?;
            standing::apply_delta(&mut *tx, fx.edition_id, pool_id, &fx.category, t1, &new1, &self.rule).await?;
            standing::apply_delta(&mut *tx, fx.edition_id, pool_id, &fx.category, t2, &new2, &self.rule).await?;
        }
        tx.commit().await?;

        tracing::debug!(fixture_id, team1_score, team2_score, "Result corrected");
        result::get_by_fixture(self.db.pool(), fixture_id)
            .await?
            .ok_or(SqliteError::not_found("result", fixture_id))
    }

    /// Retract a recorded result
    ///
    /// Reverses the standings contribution and reopens the fixture.
    pub async fn delete_result(&self, fixture_id: i64) -> Result<(), SqliteError> {
        let _guard = self.write_lock.lock().await;

        let fx = self.load_fixture(fixture_id).await?;
        let old = result::get_by_fixture(self.db.pool(), fixture_id)
            .await?
            .ok_or(SqliteError::not_found("result", fixture_id))?;

        let mut tx = self.db.pool().begin().await?;
        if let Some(pool_id) = fx.pool_id {
            let (t1, t2) = Self::participants(&fx)?;
            let (d1, d2) = StandingDelta::from_scores(old.team1_score, old.team2_score);
            standing::apply_delta(&mut *tx, fx.edition_id, pool_id, &fx.category, t1, &d1.neg(), &self.rule).await?;
            standing::apply_delta(&mut *tx, fx.edition_id, pool_id, &fx.category, t2, &d2.neg(), &self.rule).await?;
        }
        result::delete_by_fixture(&mut *tx, fixture_id).await?;
        fixture::set_outcome(&mut *tx, fixture_id, None, false).await?;
        tx.commit().await?;

        tracing::debug!(fixture_id, "Result retracted");
        Ok(())
    }

    /// Delete a fixture, retracting its result first if one exists
    pub async fn delete_fixture(&self, fixture_id: i64) -> Result<(), SqliteError> {
        let _guard = self.write_lock.lock().await;

        let fx = self.load_fixture(fixture_id).await?;
        let old = result::get_by_fixture(self.db.pool(), fixture_id).await?;

        let mut tx = self.db.pool().begin().await?;
        if let Some(result_row) = &old
            && let Some(pool_id) = fx.pool_id
        {
            let (t1, t2) = Self::participants(&fx)?;
            let (d1, d2) = StandingDelta::from_scores(result_row.team1_score, result_row.team2_score);
            standing::apply_delta(&mut *tx, fx.edition_id, pool_id, &fx.category, t1, &d1.neg(), &self.rule).await?;
            standing::apply_delta(&mut *tx, fx.edition_id, pool_id, &fx.category, t2, &d2.neg(), &self.rule).await?;
        }
        result::delete_by_fixture(&mut *tx, fixture_id).await?;
        fixture::delete_fixture_row(&mut *tx, fixture_id).await?;
        tx.commit().await?;

        tracing::debug!(fixture_id, had_result = old.is_some(), "Fixture deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sqlite::repositories::{edition, fixture, pool as pool_repo, standing, team};
    use crate::data::types::{Slot, StandingRow};
    use sqlx::SqlitePool;

    async fn setup_recorder() -> (Arc<SqliteService>, ResultRecorder) {
        let pool = SqlitePool::connect(":memory:").await.unwrap();
        sqlx::query(crate::data::sqlite::schema::SCHEMA)
            .execute(&pool)
            .await
            .unwrap();
        let db = Arc::new(SqliteService::from_pool(pool));
        let recorder = ResultRecorder::new(Arc::clone(&db), ScoringRule::default());
        (db, recorder)
    }

    struct Ground {
        edition_id: i64,
        pool_id: i64,
        teams: Vec<i64>,
    }

    async fn seed(db: &SqliteService, team_count: usize) -> Ground {
        let pool = db.pool();
        let ed = edition::create_edition(pool, "2025").await.unwrap();
        let group = pool_repo::create_pool(pool, "Pool A", "Men").await.unwrap();
        let mut teams = Vec::new();
        for i in 0..team_count {
            let t = team::create_team(
                pool,
                &format!("Team {}", (b'A' + i as u8) as char),
                &format!("T{}", i),
                None,
                "Men",
            )
            .await
            .unwrap();
            pool_repo::add_pool_entry(pool, ed.id, group.id, "Men", t.id)
                .await
                .unwrap();
            teams.push(t.id);
        }
        Ground {
            edition_id: ed.id,
            pool_id: group.id,
            teams,
        }
    }

    async fn schedule(
        db: &SqliteService,
        ground: &Ground,
        pool_fixture: bool,
        team1: Slot,
        team2: Slot,
        number: i64,
    ) -> i64 {
        fixture::create_fixture(
            db.pool(),
            fixture::NewFixture {
                edition_id: ground.edition_id,
                match_at: 1_750_000_000 + number,
                label: format!("Match {}", number),
                category: "Men".to_string(),
                match_number: number,
                pool_id: pool_fixture.then_some(ground.pool_id),
                team1,
                team2,
                slot1: None,
                slot2: None,
            },
        )
        .await
        .unwrap()
        .id
    }

    async fn table(db: &SqliteService, ground: &Ground) -> Vec<StandingRow> {
        standing::get_standings(db.pool(), ground.edition_id, Some(ground.pool_id), Some("Men"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_record_win_updates_both_teams() {
        let (db, recorder) = setup_recorder().await;
        let ground = seed(&db, 2).await;
        let fx = schedule(&db, &ground, true, Slot::Team(ground.teams[0]), Slot::Team(ground.teams[1]), 1).await;

        let result = recorder.record_result(fx, 3, 1, None).await.unwrap();
        assert_eq!(result.winner_id, Some(ground.teams[0]));

        let updated = fixture::get_fixture(db.pool(), fx).await.unwrap().unwrap();
        assert!(updated.completed);
        assert_eq!(updated.winner_id, Some(ground.teams[0]));

        let rows = table(&db, &ground).await;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].team_id, ground.teams[0]);
        assert_eq!(rows[0].points, 2);
        assert_eq!(rows[0].goal_diff, 2);
        assert_eq!(rows[1].points, 0);
        assert_eq!(rows[1].lost, 1);
    }

    #[tokio::test]
    async fn test_record_draw_splits_points() {
        let (db, recorder) = setup_recorder().await;
        let ground = seed(&db, 2).await;
        let fx = schedule(&db, &ground, true, Slot::Team(ground.teams[0]), Slot::Team(ground.teams[1]), 1).await;

        let result = recorder.record_result(fx, 2, 2, None).await.unwrap();
        assert_eq!(result.winner_id, None);

        let rows = table(&db, &ground).await;
        assert_eq!(rows[0].points, 1);
        assert_eq!(rows[1].points, 1);
        assert_eq!(rows[0].drawn, 1);
    }

    #[tokio::test]
    async fn test_record_rejects_unresolved_participant() {
        let (db, recorder) = setup_recorder().await;
        let ground = seed(&db, 2).await;
        let fx = schedule(&db, &ground, false, Slot::Team(ground.teams[0]), Slot::Unresolved, 1).await;

        let err = recorder.record_result(fx, 1, 0, None).await.unwrap_err();
        assert!(matches!(err, SqliteError::Validation(_)));
    }

    #[tokio::test]
    async fn test_record_twice_conflicts() {
        let (db, recorder) = setup_recorder().await;
        let ground = seed(&db, 2).await;
        let fx = schedule(&db, &ground, true, Slot::Team(ground.teams[0]), Slot::Team(ground.teams[1]), 1).await;

        recorder.record_result(fx, 1, 0, None).await.unwrap();
        let err = recorder.record_result(fx, 2, 0, None).await.unwrap_err();
        assert!(matches!(err, SqliteError::Conflict(_)));

        // The table still reflects exactly one result
        let rows = table(&db, &ground).await;
        assert_eq!(rows[0].played, 1);
        assert_eq!(rows[1].played, 1);
    }

    #[tokio::test]
    async fn test_update_replaces_contribution() {
        let (db, recorder) = setup_recorder().await;
        let ground = seed(&db, 2).await;
        let fx = schedule(&db, &ground, true, Slot::Team(ground.teams[0]), Slot::Team(ground.teams[1]), 1).await;

        recorder.record_result(fx, 3, 1, None).await.unwrap();
        recorder.update_result(fx, 0, 2, None).await.unwrap();

        let rows = table(&db, &ground).await;
        // Outcome flipped entirely to team 2
        assert_eq!(rows[0].team_id, ground.teams[1]);
        assert_eq!(rows[0].points, 2);
        assert_eq!(rows[0].goals_for, 2);
        assert_eq!(rows[1].points, 0);
        assert_eq!(rows[1].goals_for, 0);
        assert_eq!(rows[1].played, 1);

        let updated = fixture::get_fixture(db.pool(), fx).await.unwrap().unwrap();
        assert_eq!(updated.winner_id, Some(ground.teams[1]));
    }

    #[tokio::test]
    async fn test_update_same_score_is_stable() {
        let (db, recorder) = setup_recorder().await;
        let ground = seed(&db, 2).await;
        let fx = schedule(&db, &ground, true, Slot::Team(ground.teams[0]), Slot::Team(ground.teams[1]), 1).await;

        recorder.record_result(fx, 2, 1, None).await.unwrap();
        let before = table(&db, &ground).await;
        recorder.update_result(fx, 2, 1, None).await.unwrap();
        let after = table(&db, &ground).await;

        for (b, a) in before.iter().zip(after.iter()) {
            assert_eq!(b.played, a.played);
            assert_eq!(b.points, a.points);
            assert_eq!(b.goal_diff, a.goal_diff);
        }
    }

    #[tokio::test]
    async fn test_delete_result_reverses_and_reopens() {
        let (db, recorder) = setup_recorder().await;
        let ground = seed(&db, 2).await;
        let fx = schedule(&db, &ground, true, Slot::Team(ground.teams[0]), Slot::Team(ground.teams[1]), 1).await;

        recorder.record_result(fx, 3, 1, None).await.unwrap();
        recorder.delete_result(fx).await.unwrap();

        let rows = table(&db, &ground).await;
        for row in &rows {
            assert_eq!(row.played, 0);
            assert_eq!(row.points, 0);
            assert_eq!(row.goal_diff, 0);
        }

        let reopened = fixture::get_fixture(db.pool(), fx).await.unwrap().unwrap();
        assert!(!reopened.completed);
        assert_eq!(reopened.winner_id, None);

        // Recording again works
        recorder.record_result(fx, 0, 1, None).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_fixture_retracts_result() {
        let (db, recorder) = setup_recorder().await;
        let ground = seed(&db, 2).await;
        let fx = schedule(&db, &ground, true, Slot::Team(ground.teams[0]), Slot::Team(ground.teams[1]), 1).await;

        recorder.record_result(fx, 4, 0, None).await.unwrap();
        recorder.delete_fixture(fx).await.unwrap();

        assert!(fixture::get_fixture(db.pool(), fx).await.unwrap().is_none());
        let rows = table(&db, &ground).await;
        for row in &rows {
            assert_eq!(row.played, 0);
            assert_eq!(row.points, 0);
        }
    }

    #[tokio::test]
    async fn test_bracket_fixture_leaves_standings_alone() {
        let (db, recorder) = setup_recorder().await;
        let ground = seed(&db, 2).await;
        let fx = schedule(&db, &ground, false, Slot::Team(ground.teams[0]), Slot::Team(ground.teams[1]), 1).await;

        recorder.record_result(fx, 5, 4, None).await.unwrap();

        let rows = table(&db, &ground).await;
        assert!(rows.iter().all(|r| r.played == 0));

        let updated = fixture::get_fixture(db.pool(), fx).await.unwrap().unwrap();
        assert!(updated.completed);
        assert_eq!(updated.winner_id, Some(ground.teams[0]));
    }

    #[tokio::test]
    async fn test_table_totals_are_zero_sum() {
        let (db, recorder) = setup_recorder().await;
        let ground = seed(&db, 3).await;
        let [a, b, c] = ground.teams[..] else { unreachable!() };

        let fx1 = schedule(&db, &ground, true, Slot::Team(a), Slot::Team(b), 1).await;
        let fx2 = schedule(&db, &ground, true, Slot::Team(b), Slot::Team(c), 2).await;
        let fx3 = schedule(&db, &ground, true, Slot::Team(c), Slot::Team(a), 3).await;

        recorder.record_result(fx1, 2, 0, None).await.unwrap();
        recorder.record_result(fx2, 1, 1, None).await.unwrap();
        recorder.record_result(fx3, 0, 3, None).await.unwrap();

        let rows = table(&db, &ground).await;
        let gf: i64 = rows.iter().map(|r| r.goals_for).sum();
        let ga: i64 = rows.iter().map(|r| r.goals_against).sum();
        let won: i64 = rows.iter().map(|r| r.won).sum();
        let lost: i64 = rows.iter().map(|r| r.lost).sum();
        let diff: i64 = rows.iter().map(|r| r.goal_diff).sum();
        assert_eq!(gf, ga);
        assert_eq!(won, lost);
        assert_eq!(diff, 0);
    }

    #[tokio::test]
    async fn test_concurrent_submissions_serialize() {
        // File-backed DB so all pooled connections see the same store
        let dir = tempfile::tempdir().unwrap();
        let options = sqlx::sqlite::SqliteConnectOptions::new()
            .filename(dir.path().join("recorder.db"))
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .unwrap();
        sqlx::query(crate::data::sqlite::schema::SCHEMA)
            .execute(&pool)
            .await
            .unwrap();
        let db = Arc::new(SqliteService::from_pool(pool));
        let recorder = Arc::new(ResultRecorder::new(Arc::clone(&db), ScoringRule::default()));

        let ground = seed(&db, 4).await;
        let mut fixtures = Vec::new();
        let mut number = 0;
        for i in 0..4 {
            for j in (i + 1)..4 {
                number += 1;
                let fx = schedule(
                    &db,
                    &ground,
                    true,
                    Slot::Team(ground.teams[i]),
                    Slot::Team(ground.teams[j]),
                    number,
                )
                .await;
                fixtures.push(fx);
            }
        }

        let mut handles = Vec::new();
        for (i, fx) in fixtures.iter().enumerate() {
            let recorder = Arc::clone(&recorder);
            let fx = *fx;
            let score = i as i64;
            handles.push(tokio::spawn(async move {
                recorder.record_result(fx, score % 4, (score + 1) % 3, None).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let rows = table(&db, &ground).await;
        let played: i64 = rows.iter().map(|r| r.played).sum();
        assert_eq!(played, 12); // 6 fixtures, 2 teams each
        let gf: i64 = rows.iter().map(|r| r.goals_for).sum();
        let ga: i64 = rows.iter().map(|r| r.goals_against).sum();
        assert_eq!(gf, ga);
    }
}
