use actix_web::{web, HttpResponse};
use log::info;

use super::workflow_models::{
    DeleteWorkflowResponse, SaveWorkflowResponse,
    TriggerWorkflowRequest, TriggerWorkflowResponse,
};
use crate::ai_tasks::run_user_task;
use crate::error::ApiError;
use crate::models::workflow::Workflow;
use crate::state::AppState;
use crate::store::generate_workflow_id;

async fn save(state: &AppState, workflow_id: String, workflow: Workflow) -> SaveWorkflowResponse {
    let replaced = state.store.save(&workflow_id, workflow).await;
    info!("Workflow {} {}", workflow_id, if replaced { "updated" } else { "created" });
    SaveWorkflowResponse {
        success: true,
        message: if replaced {
            "Workflow updated".into()
        } else {
            "Workflow saved".into()
        },
        workflow_id,
    }
}

// Path ids are trimmed so save, delete and trigger agree on the same key.
fn workflow_id_from(path: web::Path<String>) -> Result<String, ApiError> {
    let workflow_id = path.into_inner().trim().to_string();
    if workflow_id.is_empty() {
        return Err(ApiError::BadRequest("Workflow ID must not be empty".into()));
    }
    Ok(workflow_id)
}

// Save (or replace) a workflow under the id in the path
pub async fn save_workflow(
    state: web::Data<AppState>,
    path: web::Path<String>,
    request: web::Json<Workflow>,
) -> Result<HttpResponse, ApiError> {
    let workflow_id = workflow_id_from(path)?;
    Ok(HttpResponse::Ok().json(save(&state, workflow_id, request.into_inner()).await))
}

// Save a workflow under a freshly generated id
pub async fn create_workflow(
    state: web::Data<AppState>,
    request: web::Json<Workflow>,
) -> Result<HttpResponse, ApiError> {
    let workflow_id = generate_workflow_id();
    Ok(HttpResponse::Ok().json(save(&state, workflow_id, request.into_inner()).await))
}

pub async fn list_workflows(state: web::Data<AppState>) -> HttpResponse {
    let workflows = state.store.all().await;
    info!("Listing {} workflows", workflows.len());
    HttpResponse::Ok().json(workflows)
}

pub async fn delete_workflow(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let workflow_id = workflow_id_from(path)?;
    match state.store.delete(&workflow_id).await {
        Some(_) => {
            info!("Workflow {} deleted", workflow_id);
            Ok(HttpResponse::Ok().json(DeleteWorkflowResponse {
                success: true,
                message: format!("Workflow '{}' deleted", workflow_id),
            }))
        }
        None => Err(ApiError::NotFound(format!("Workflow '{}' not found", workflow_id))),
    }
}

// Run the workflow's AI task on the submitted text, then simulate its action
pub async fn trigger_workflow(
    state: web::Data<AppState>,
    path: web::Path<String>,
    request: web::Json<TriggerWorkflowRequest>,
) -> Result<HttpResponse, ApiError> {
    let workflow_id = workflow_id_from(path)?;
    let workflow = state
        .store
        .get(&workflow_id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Workflow '{}' not found", workflow_id)))?;

    info!("Triggering workflow {} ({:?})", workflow_id, workflow.ai_task);
    let result = run_user_task(workflow.ai_task, &request.text)?;
    // Actions have no real integration yet; the log line stands in for them.
    info!("Simulated action '{}' for workflow {}", workflow.action.label(), workflow_id);

    Ok(HttpResponse::Ok().json(TriggerWorkflowResponse {
        status: "success",
        workflow_id,
        trigger: workflow.trigger,
        ai_task: workflow.ai_task,
        action: workflow.action,
        action_status: "simulated",
        result,
    }))
}
