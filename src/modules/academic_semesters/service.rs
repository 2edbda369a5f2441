use tracing::instrument;

use campusbyte_core::{AppError, ErrorKind, PaginationMeta, PaginationParams};
use campusbyte_db::{ById, CatalogStore};
use campusbyte_models::ids::AcademicSemesterId;

use crate::modules::academic_semesters::model::{
    AcademicSemester, CreateAcademicSemesterDto, PaginatedAcademicSemestersResponse,
};
use crate::utils::referential::require;
use crate::utils::store_errors::unique_violation_as;

pub struct AcademicSemesterService;

impl AcademicSemesterService {
    #[instrument(skip(store))]
    pub async fn create_academic_semester<S>(
        store: &S,
        dto: CreateAcademicSemesterDto,
    ) -> Result<AcademicSemester, AppError>
    where
        S: CatalogStore + ?Sized,
    {
        if dto.name.code() != dto.code {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Invalid semester code {} for {}",
                dto.code,
                dto.name
            )));
        }

        store.insert_academic_semester(&dto).await.map_err(|e| {
            unique_violation_as(
                e,
                ErrorKind::Conflict,
                "Academic semester already exists for this year",
            )
        })
    }

    #[instrument(skip(store))]
    pub async fn get_academic_semesters<S>(
        store: &S,
        params: PaginationParams,
    ) -> Result<PaginatedAcademicSemestersResponse, AppError>
    where
        S: CatalogStore + ?Sized,
    {
        let (semesters, total) = store
            .list_academic_semesters(params.limit(), params.offset())
            .await?;

        Ok(PaginatedAcademicSemestersResponse {
            data: semesters,
            meta: PaginationMeta::from_params(&params, total),
        })
    }

    #[instrument(skip(store))]
    pub async fn get_academic_semester<S>(
        store: &S,
        id: AcademicSemesterId,
    ) -> Result<AcademicSemester, AppError>
    where
        S: CatalogStore + ?Sized,
    {
        require(store, &ById::<AcademicSemester>::new(id), "Academic semester not found").await
    }
}
