use tracing::instrument;

use campusbyte_core::{AppError, ErrorKind, PaginationMeta, PaginationParams};
use campusbyte_db::{ById, CatalogStore};
use campusbyte_models::ids::{CourseId, FacultyId};
use campusbyte_models::users::Faculty;

use crate::modules::courses::model::{
    AssignCourseFacultiesDto, Course, CourseFacultiesResponse, CreateCourseDto,
    PaginatedCoursesResponse, UpdateCourseDto,
};
use crate::utils::referential::require;
use crate::utils::store_errors::{foreign_key_violation_as, unique_violation_as};

pub struct CourseService;

impl CourseService {
    #[instrument(skip(store))]
    pub async fn create_course<S>(store: &S, dto: CreateCourseDto) -> Result<Course, AppError>
    where
        S: CatalogStore + ?Sized,
    {
        store
            .insert_course(&dto)
            .await
            .map_err(|e| unique_violation_as(e, ErrorKind::Conflict, "Course already exists"))
    }

    #[instrument(skip(store))]
    pub async fn get_courses<S>(
        store: &S,
        params: PaginationParams,
    ) -> Result<PaginatedCoursesResponse, AppError>
    where
        S: CatalogStore + ?Sized,
    {
        let (courses, total) = store.list_courses(params.limit(), params.offset()).await?;

        Ok(PaginatedCoursesResponse {
            data: courses,
            meta: PaginationMeta::from_params(&params, total),
        })
    }

    #[instrument(skip(store))]
    pub async fn get_course<S>(store: &S, id: CourseId) -> Result<Course, AppError>
    where
        S: CatalogStore + ?Sized,
    {
        require(store, &ById::<Course>::new(id), "Course not found").await
    }

    #[instrument(skip(store))]
    pub async fn update_course<S>(
        store: &S,
        id: CourseId,
        dto: UpdateCourseDto,
    ) -> Result<Course, AppError>
    where
        S: CatalogStore + ?Sized,
    {
        store
            .update_course(id, &dto)
            .await
            .map_err(|e| unique_violation_as(e, ErrorKind::Conflict, "Course already exists"))?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Course not found")))
    }

    /// Deletes the course along with its eligibility list.
    ///
    /// A course that still has offerings cannot be deleted.
    #[instrument(skip(store))]
    pub async fn delete_course<S>(store: &S, id: CourseId) -> Result<Course, AppError>
    where
        S: CatalogStore + ?Sized,
    {
        let course = store
            .delete_course(id)
            .await
            .map_err(|e| {
                foreign_key_violation_as(
                    e,
                    ErrorKind::Conflict,
                    "Course is offered in a semester registration",
                )
            })?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Course not found")))?;

        tracing::info!(course_id = %course.id, title = %course.title, "Course deleted");
        Ok(course)
    }

    /// Makes the given faculty members eligible to teach the course.
    ///
    /// Faculty members that are already eligible are left as they are.
    #[instrument(skip(store))]
    pub async fn assign_faculties<S>(
        store: &S,
        course_id: CourseId,
        dto: AssignCourseFacultiesDto,
    ) -> Result<CourseFacultiesResponse, AppError>
    where
        S: CatalogStore + ?Sized,
    {
        require(store, &ById::<Course>::new(course_id), "Course not found").await?;
        for faculty_id in &dto.faculties {
            require_faculty(store, *faculty_id).await?;
        }

        let faculties = store.add_course_faculties(course_id, &dto.faculties).await?;
        tracing::info!(
            course_id = %course_id,
            eligible = faculties.len(),
            "Course faculties assigned"
        );

        Ok(CourseFacultiesResponse {
            course_id,
            faculties,
        })
    }

    #[instrument(skip(store))]
    pub async fn remove_faculties<S>(
        store: &S,
        course_id: CourseId,
        dto: AssignCourseFacultiesDto,
    ) -> Result<CourseFacultiesResponse, AppError>
    where
        S: CatalogStore + ?Sized,
    {
        require(store, &ById::<Course>::new(course_id), "Course not found").await?;

        let faculties = store
            .remove_course_faculties(course_id, &dto.faculties)
            .await?;

        Ok(CourseFacultiesResponse {
            course_id,
            faculties,
        })
    }

    #[instrument(skip(store))]
    pub async fn get_faculties<S>(
        store: &S,
        course_id: CourseId,
    ) -> Result<CourseFacultiesResponse, AppError>
    where
        S: CatalogStore + ?Sized,
    {
        require(store, &ById::<Course>::new(course_id), "Course not found").await?;
        let faculties = store.course_faculties(course_id).await?;

        Ok(CourseFacultiesResponse {
            course_id,
            faculties,
        })
    }
}

async fn require_faculty<S>(store: &S, faculty_id: FacultyId) -> Result<Faculty, AppError>
where
    S: CatalogStore + ?Sized,
{
    require(store, &ById::<Faculty>::new(faculty_id), "Faculty not found").await
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusbyte_db::MemoryStore;

    fn course_dto() -> CreateCourseDto {
        CreateCourseDto {
            title: "Operating Systems".into(),
            prefix: "CSE".into(),
            code: 310,
            credits: 3,
        }
    }

    #[tokio::test]
    async fn test_duplicate_title_conflicts() {
        let store = MemoryStore::new();
        CourseService::create_course(&store, course_dto()).await.unwrap();
        let err = CourseService::create_course(&store, course_dto())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(err.message(), "Course already exists");
    }

    #[tokio::test]
    async fn test_assign_rejects_unknown_faculty() {
        let store = MemoryStore::new();
        let course = CourseService::create_course(&store, course_dto()).await.unwrap();

        let err = CourseService::assign_faculties(
            &store,
            course.id,
            AssignCourseFacultiesDto {
                faculties: vec![FacultyId::new()],
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.message(), "Faculty not found");
        assert!(store.course_faculties(course.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_unknown_course_is_not_found() {
        let store = MemoryStore::new();
        let err = CourseService::update_course(
            &store,
            CourseId::new(),
            UpdateCourseDto {
                credits: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.message(), "Course not found");
    }

    #[tokio::test]
    async fn test_delete_course_then_not_found() {
        let store = MemoryStore::new();
        let course = CourseService::create_course(&store, course_dto()).await.unwrap();

        let deleted = CourseService::delete_course(&store, course.id).await.unwrap();
        assert_eq!(deleted.title, "Operating Systems");

        let err = CourseService::delete_course(&store, course.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_faculties_of_unknown_course() {
        let store = MemoryStore::new();
        let err = CourseService::get_faculties(&store, CourseId::new())
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Course not found");
    }
}
