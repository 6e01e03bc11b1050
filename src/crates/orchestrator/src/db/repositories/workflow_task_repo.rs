//! WorkflowTask repository for managing workflow-task associations

use crate::db::connection::DatabasePool;
use crate::db::models::WorkflowTask;

/// WorkflowTask repository for managing workflow-task junction table operations
pub struct WorkflowTaskRepository;

impl WorkflowTaskRepository {
    /// Create a new workflow-task association
    pub async fn create(
        pool: &DatabasePool,
        workflow_id: String,
        task_id: String,
        sequence: i32,
    ) -> Result<WorkflowTask, sqlx::Error> {
        let now = chrono::Utc::now().to_rfc3339();
        sqlx::query_as::<_, WorkflowTask>(
            "INSERT INTO workflow_tasks (workflow_id, task_id, sequence, created_at)
             VALUES (?, ?, ?, ?)
             RETURNING *"
        )
        .bind(&workflow_id)
        .bind(&task_id)
        .bind(sequence)
        .bind(&now)
        .fetch_one(pool)
        .await
    }

    /// Get a workflow-task association
    pub async fn get(
        pool: &DatabasePool,
        workflow_id: &str,
        task_id: &str,
    ) -> Result<Option<WorkflowTask>, sqlx::Error> {
        sqlx::query_as::<_, WorkflowTask>(
            "SELECT * FROM workflow_tasks WHERE workflow_id = ? AND task_id = ?"
        )
        .bind(workflow_id)
        .bind(task_id)
        .fetch_optional(pool)
        .await
    }

    /// List all tasks in a workflow ordered by sequence
    pub async fn list_by_workflow(
        pool: &DatabasePool,
        workflow_id: &str,
    ) -> Result<Vec<WorkflowTask>, sqlx::Error> {
        sqlx::query_as::<_, WorkflowTask>(
            "SELECT * FROM workflow_tasks WHERE workflow_id = ? ORDER BY sequence ASC"
        )
        .bind(workflow_id)
        .fetch_all(pool)
        .await
    }

    /// List all workflows containing a specific task
    pub async fn list_by_task(
        pool: &DatabasePool,
        task_id: &str,
    ) -> Result<Vec<WorkflowTask>, sqlx::Error> {
        sqlx::query_as::<_, WorkflowTask>(
            "SELECT * FROM workflow_tasks WHERE task_id = ? ORDER BY created_at DESC"
        )
        .bind(task_id)
        .fetch_all(pool)
        .await
    }

    /// Update the sequence of a workflow-task association
    pub async fn update_sequence(
        pool: &DatabasePool,
        workflow_id: &str,
        task_id: &str,
        sequence: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE workflow_tasks SET sequence = ? WHERE workflow_id = ? AND task_id = ?"
        )
        .bind(sequence)
        .bind(workflow_id)
        .bind(task_id)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Delete a workflow-task association
    pub async fn delete(
        pool: &DatabasePool,
        workflow_id: &str,
        task_id: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "DELETE FROM workflow_tasks WHERE workflow_id = ? AND task_id = ?"
        )
        .bind(workflow_id)
        .bind(task_id)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Delete all tasks from a workflow
    pub async fn delete_by_workflow(
        pool: &DatabasePool,
        workflow_id: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM workflow_tasks WHERE workflow_id = ?")
            .bind(workflow_id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Count tasks in a workflow
    pub async fn count_by_workflow(
        pool: &DatabasePool,
        workflow_id: &str,
    ) -> Result<i64, sqlx::Error> {
        let result: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM workflow_tasks WHERE workflow_id = ?")
                .bind(workflow_id)
                .fetch_one(pool)
                .await?;

        Ok(result.0)
    }

    /// Count workflows containing a task
    pub async fn count_by_task(
        pool: &DatabasePool,
        task_id: &str,
    ) -> Result<i64, sqlx::Error> {
        let result: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM workflow_tasks WHERE task_id = ?")
                .bind(task_id)
                .fetch_one(pool)
                .await?;

        Ok(result.0)
    }
}
