use tracing::instrument;

use campusbyte_core::{AppError, ErrorKind, PaginationMeta};
use campusbyte_db::{ById, CatalogStore, OpenRegistration};
use campusbyte_models::academic::AcademicSemester;
use campusbyte_models::ids::SemesterRegistrationId;
use campusbyte_models::value_types::RegistrationStatus;

use crate::modules::semester_registrations::model::{
    CreateSemesterRegistrationDto, NewSemesterRegistration,
    PaginatedSemesterRegistrationsResponse, SemesterRegistration,
    SemesterRegistrationFilterParams, UpdateSemesterRegistrationDto,
};
use crate::utils::referential::{Check, require, validate_record};
use crate::utils::store_errors::unique_violation_as;

pub struct SemesterRegistrationService;

impl SemesterRegistrationService {
    #[instrument(skip(store))]
    pub async fn create_semester_registration<S>(
        store: &S,
        dto: CreateSemesterRegistrationDto,
    ) -> Result<SemesterRegistration, AppError>
    where
        S: CatalogStore + ?Sized,
    {
        require(
            store,
            &ById::<AcademicSemester>::new(dto.academic_semester_id),
            "Academic semester not found",
        )
        .await?;

        validate_record(
            store,
            &OpenRegistration,
            Check::absent("There is already an UPCOMING or ONGOING registered semester"),
        )
        .await?;

        let new = NewSemesterRegistration::from(dto);
        let registration = store.insert_semester_registration(&new).await.map_err(|e| {
            unique_violation_as(
                e,
                ErrorKind::Conflict,
                "This semester is already registered",
            )
        })?;

        tracing::info!(
            registration_id = %registration.id,
            status = %registration.status,
            "Semester registration created"
        );
        Ok(registration)
    }

    #[instrument(skip(store))]
    pub async fn get_semester_registrations<S>(
        store: &S,
        filter: SemesterRegistrationFilterParams,
    ) -> Result<PaginatedSemesterRegistrationsResponse, AppError>
    where
        S: CatalogStore + ?Sized,
    {
        let (registrations, total) = store.list_semester_registrations(&filter).await?;

        Ok(PaginatedSemesterRegistrationsResponse {
            data: registrations,
            meta: PaginationMeta::from_params(&filter.pagination, total),
        })
    }

    #[instrument(skip(store))]
    pub async fn get_semester_registration<S>(
        store: &S,
        id: SemesterRegistrationId,
    ) -> Result<SemesterRegistration, AppError>
    where
        S: CatalogStore + ?Sized,
    {
        require(
            store,
            &ById::<SemesterRegistration>::new(id),
            "Semester registration not found",
        )
        .await
    }

    /// Updates a registration that has not ended.
    ///
    /// A status change must be a single step forward.
    #[instrument(skip(store))]
    pub async fn update_semester_registration<S>(
        store: &S,
        id: SemesterRegistrationId,
        dto: UpdateSemesterRegistrationDto,
    ) -> Result<SemesterRegistration, AppError>
    where
        S: CatalogStore + ?Sized,
    {
        let current = require(
            store,
            &ById::<SemesterRegistration>::new(id),
            "Semester registration not found",
        )
        .await?;

        if current.status == RegistrationStatus::Ended {
            return Err(AppError::invalid_state(anyhow::anyhow!(
                "This semester registration has already ENDED"
            )));
        }

        if let Some(next) = dto.status
            && !current.status.can_transition_to(next)
        {
            return Err(AppError::invalid_state(anyhow::anyhow!(
                "Status can not be changed from {} to {}",
                current.status,
                next
            )));
        }

        let updated = store
            .update_semester_registration(id, &dto)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Semester registration not found")))?;

        if updated.status != current.status {
            tracing::info!(
                registration_id = %id,
                from = %current.status,
                to = %updated.status,
                "Semester registration status changed"
            );
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusbyte_db::MemoryStore;
    use campusbyte_models::academic::CreateAcademicSemesterDto;
    use campusbyte_models::value_types::{Month, SemesterCode, SemesterName};
    use chrono::{TimeZone, Utc};

    async fn semester(store: &MemoryStore, name: SemesterName) -> AcademicSemester {
        store
            .insert_academic_semester(&CreateAcademicSemesterDto {
                name,
                code: name.code(),
                year: 2030,
                start_month: Month::January,
                end_month: Month::April,
            })
            .await
            .unwrap()
    }

    fn create_dto(semester: &AcademicSemester) -> CreateSemesterRegistrationDto {
        CreateSemesterRegistrationDto {
            academic_semester_id: semester.id,
            status: None,
            start_date: Utc.with_ymd_and_hms(2030, 1, 10, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2030, 4, 30, 0, 0, 0).unwrap(),
            min_credit: None,
            max_credit: None,
        }
    }

    fn status(status: RegistrationStatus) -> UpdateSemesterRegistrationDto {
        UpdateSemesterRegistrationDto {
            status: Some(status),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_second_open_registration_conflicts() {
        let store = MemoryStore::new();
        let autumn = semester(&store, SemesterName::Autumn).await;
        let summer = semester(&store, SemesterName::Summer).await;

        SemesterRegistrationService::create_semester_registration(&store, create_dto(&autumn))
            .await
            .unwrap();
        let err =
            SemesterRegistrationService::create_semester_registration(&store, create_dto(&summer))
                .await
                .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_status_moves_forward_one_step() {
        let store = MemoryStore::new();
        let autumn = semester(&store, SemesterName::Autumn).await;
        let registration =
            SemesterRegistrationService::create_semester_registration(&store, create_dto(&autumn))
                .await
                .unwrap();

        let skip = SemesterRegistrationService::update_semester_registration(
            &store,
            registration.id,
            status(RegistrationStatus::Ended),
        )
        .await
        .unwrap_err();
        assert_eq!(skip.kind, ErrorKind::InvalidState);

        let ongoing = SemesterRegistrationService::update_semester_registration(
            &store,
            registration.id,
            status(RegistrationStatus::Ongoing),
        )
        .await
        .unwrap();
        assert_eq!(ongoing.status, RegistrationStatus::Ongoing);

        let back = SemesterRegistrationService::update_semester_registration(
            &store,
            registration.id,
            status(RegistrationStatus::Upcoming),
        )
        .await
        .unwrap_err();
        assert_eq!(back.kind, ErrorKind::InvalidState);

        SemesterRegistrationService::update_semester_registration(
            &store,
            registration.id,
            status(RegistrationStatus::Ended),
        )
        .await
        .unwrap();

        let after_end = SemesterRegistrationService::update_semester_registration(
            &store,
            registration.id,
            UpdateSemesterRegistrationDto {
                max_credit: Some(18),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(after_end.kind, ErrorKind::InvalidState);
    }

    #[tokio::test]
    async fn test_ended_registration_frees_the_open_slot() {
        let store = MemoryStore::new();
        let autumn = semester(&store, SemesterName::Autumn).await;
        let summer = semester(&store, SemesterName::Summer).await;
        let first = SemesterRegistrationService::create_semester_registration(
            &store,
            CreateSemesterRegistrationDto {
                status: Some(RegistrationStatus::Ended),
                ..create_dto(&autumn)
            },
        )
        .await
        .unwrap();
        assert_eq!(first.status, RegistrationStatus::Ended);

        SemesterRegistrationService::create_semester_registration(&store, create_dto(&summer))
            .await
            .unwrap();
    }
}
