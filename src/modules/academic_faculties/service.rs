use tracing::instrument;

use campusbyte_core::{AppError, ErrorKind, PaginationMeta, PaginationParams};
use campusbyte_db::{ById, CatalogStore};
use campusbyte_models::ids::AcademicFacultyId;

use crate::modules::academic_faculties::model::{
    AcademicFaculty, CreateAcademicFacultyDto, PaginatedAcademicFacultiesResponse,
};
use crate::utils::referential::require;
use crate::utils::store_errors::unique_violation_as;

pub struct AcademicFacultyService;

impl AcademicFacultyService {
    #[instrument(skip(store))]
    pub async fn create_academic_faculty<S>(
        store: &S,
        dto: CreateAcademicFacultyDto,
    ) -> Result<AcademicFaculty, AppError>
    where
        S: CatalogStore + ?Sized,
    {
        store
            .insert_academic_faculty(&dto)
            .await
            .map_err(|e| unique_violation_as(e, ErrorKind::Conflict, "Academic faculty already exists"))
    }

    #[instrument(skip(store))]
    pub async fn get_academic_faculties<S>(
        store: &S,
        params: PaginationParams,
    ) -> Result<PaginatedAcademicFacultiesResponse, AppError>
    where
        S: CatalogStore + ?Sized,
    {
        let (faculties, total) = store
            .list_academic_faculties(params.limit(), params.offset())
            .await?;

        Ok(PaginatedAcademicFacultiesResponse {
            data: faculties,
            meta: PaginationMeta::from_params(&params, total),
        })
    }

    #[instrument(skip(store))]
    pub async fn get_academic_faculty<S>(
        store: &S,
        id: AcademicFacultyId,
    ) -> Result<AcademicFaculty, AppError>
    where
        S: CatalogStore + ?Sized,
    {
        require(store, &ById::<AcademicFaculty>::new(id), "Academic faculty not found").await
    }
}
