//! 院系管理（管理员）

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};
use std::sync::Arc;
use tracing::warn;

use super::{found, respond, respond_empty};
use crate::errors::{EduPortalError, Result};
use crate::models::departments::{
    entities::Department, requests::DepartmentRequest, responses::DepartmentListResponse,
};
use crate::storage::Storage;

pub struct DepartmentService {
    storage: Option<Arc<dyn Storage>>,
}

fn department_name(request: &DepartmentRequest) -> Result<&str> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(EduPortalError::validation("Department name is required"));
    }
    Ok(name)
}

pub async fn list_departments(storage: &dyn Storage) -> Result<DepartmentListResponse> {
    Ok(DepartmentListResponse {
        items: storage.list_departments().await?,
    })
}

pub async fn create_department(
    storage: &dyn Storage,
    request: DepartmentRequest,
) -> Result<Department> {
    storage.create_department(department_name(&request)?).await
}

pub async fn update_department(
    storage: &dyn Storage,
    department_id: i64,
    request: DepartmentRequest,
) -> Result<Department> {
    let name = department_name(&request)?;
    found(
        storage.update_department(department_id, name).await?,
        "Department not found",
    )
}

/// 删除院系会连带删除其下全部课程和用户
pub async fn delete_department(storage: &dyn Storage, department_id: i64) -> Result<()> {
    if !storage.delete_department_cascade(department_id).await? {
        return Err(EduPortalError::not_found("Department not found"));
    }
    warn!("Department {} deleted with all its courses and users", department_id);
    Ok(())
}

impl DepartmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    pub async fn list_departments(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        respond(
            list_departments(storage.as_ref()).await,
            StatusCode::OK,
            "Department list retrieved successfully",
        )
    }

    pub async fn create_department(
        &self,
        data: DepartmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        respond(
            create_department(storage.as_ref(), data).await,
            StatusCode::CREATED,
            "Department created successfully",
        )
    }

    pub async fn update_department(
        &self,
        department_id: i64,
        data: DepartmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        respond(
            update_department(storage.as_ref(), department_id, data).await,
            StatusCode::OK,
            "Department updated successfully",
        )
    }

    pub async fn delete_department(
        &self,
        department_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);
        respond_empty(
            delete_department(storage.as_ref(), department_id).await,
            "Department deleted successfully",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::testing::memory_storage;

    #[tokio::test]
    async fn test_department_crud() {
        let storage = memory_storage().await;
        let empty = create_department(
            storage.as_ref(),
            DepartmentRequest {
                name: "   ".to_string(),
            },
        )
        .await;
        assert!(matches!(empty, Err(EduPortalError::Validation(_))));

        let dept = create_department(
            storage.as_ref(),
            DepartmentRequest {
                name: " Physics ".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(dept.name, "Physics");

        let renamed = update_department(
            storage.as_ref(),
            dept.id,
            DepartmentRequest {
                name: "Applied Physics".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(renamed.name, "Applied Physics");

        delete_department(storage.as_ref(), dept.id).await.unwrap();
        assert!(list_departments(storage.as_ref()).await.unwrap().items.is_empty());
        assert!(matches!(
            delete_department(storage.as_ref(), dept.id).await,
            Err(EduPortalError::NotFound(_))
        ));
    }
}
