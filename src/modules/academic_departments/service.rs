use tracing::instrument;

use campusbyte_core::{AppError, ErrorKind, PaginationMeta};
use campusbyte_db::{ById, CatalogStore};
use campusbyte_models::academic::AcademicFaculty;
use campusbyte_models::ids::AcademicDepartmentId;

use crate::modules::academic_departments::model::{
    AcademicDepartment, AcademicDepartmentFilterParams, CreateAcademicDepartmentDto,
    PaginatedAcademicDepartmentsResponse,
};
use crate::utils::referential::require;
use crate::utils::store_errors::unique_violation_as;

pub struct AcademicDepartmentService;

impl AcademicDepartmentService {
    #[instrument(skip(store))]
    pub async fn create_academic_department<S>(
        store: &S,
        dto: CreateAcademicDepartmentDto,
    ) -> Result<AcademicDepartment, AppError>
    where
        S: CatalogStore + ?Sized,
    {
        require(
            store,
            &ById::<AcademicFaculty>::new(dto.academic_faculty_id),
            "Academic faculty not found",
        )
        .await?;

        store.insert_academic_department(&dto).await.map_err(|e| {
            unique_violation_as(e, ErrorKind::Conflict, "Academic department already exists")
        })
    }

    #[instrument(skip(store))]
    pub async fn get_academic_departments<S>(
        store: &S,
        filter: AcademicDepartmentFilterParams,
    ) -> Result<PaginatedAcademicDepartmentsResponse, AppError>
    where
        S: CatalogStore + ?Sized,
    {
        let (departments, total) = store.list_academic_departments(&filter).await?;

        Ok(PaginatedAcademicDepartmentsResponse {
            data: departments,
            meta: PaginationMeta::from_params(&filter.pagination, total),
        })
    }

    #[instrument(skip(store))]
    pub async fn get_academic_department<S>(
        store: &S,
        id: AcademicDepartmentId,
    ) -> Result<AcademicDepartment, AppError>
    where
        S: CatalogStore + ?Sized,
    {
        require(store, &ById::<AcademicDepartment>::new(id), "Academic department not found").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusbyte_db::MemoryStore;
    use campusbyte_models::academic::CreateAcademicFacultyDto;
    use campusbyte_models::ids::AcademicFacultyId;

    #[tokio::test]
    async fn test_department_requires_existing_faculty() {
        let store = MemoryStore::new();
        let err = AcademicDepartmentService::create_academic_department(
            &store,
            CreateAcademicDepartmentDto {
                name: "Computer Science".into(),
                academic_faculty_id: AcademicFacultyId::new(),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.message(), "Academic faculty not found");
    }

    #[tokio::test]
    async fn test_department_is_created_under_faculty() {
        let store = MemoryStore::new();
        let faculty = store
            .insert_academic_faculty(&CreateAcademicFacultyDto {
                name: "Engineering".into(),
            })
            .await
            .unwrap();

        let department = AcademicDepartmentService::create_academic_department(
            &store,
            CreateAcademicDepartmentDto {
                name: "Computer Science".into(),
                academic_faculty_id: faculty.id,
            },
        )
        .await
        .unwrap();
        assert_eq!(department.academic_faculty_id, faculty.id);

        let found = AcademicDepartmentService::get_academic_department(&store, department.id)
            .await
            .unwrap();
        assert_eq!(found.name, "Computer Science");
    }
}
