use async_trait::async_trait;
use campusbyte_models::academic::{
    AcademicDepartment, AcademicDepartmentFilterParams, AcademicFaculty, AcademicSemester,
    CreateAcademicDepartmentDto, CreateAcademicFacultyDto, CreateAcademicSemesterDto,
};
use campusbyte_models::courses::{Course, CreateCourseDto, UpdateCourseDto};
use campusbyte_models::ids::{
    AcademicDepartmentId, AcademicFacultyId, AcademicSemesterId, CourseId, FacultyId,
    SemesterRegistrationId,
};
use campusbyte_models::semester_registrations::{
    NewSemesterRegistration, SemesterRegistration, SemesterRegistrationFilterParams,
    UpdateSemesterRegistrationDto,
};
use chrono::Utc;

use super::{MemoryState, MemoryStore, paginate};
use crate::error::{RepositoryError, RepositoryResult};
use crate::repository::CatalogStore;

fn unique_violation(constraint: &str) -> RepositoryError {
    RepositoryError::UniqueViolation(constraint.to_string())
}

fn eligible_faculties(state: &MemoryState, course_id: CourseId) -> Vec<FacultyId> {
    state
        .course_faculties
        .iter()
        .filter(|(course, _)| *course == course_id)
        .map(|(_, faculty)| *faculty)
        .collect()
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.inner.read()?;
        Ok(true)
    }

    async fn insert_academic_semester(
        &self,
        dto: &CreateAcademicSemesterDto,
    ) -> RepositoryResult<AcademicSemester> {
        let mut state = self.inner.write()?;
        if state
            .academic_semesters
            .iter()
            .any(|s| s.name == dto.name && s.year == dto.year)
        {
            return Err(unique_violation("unique_academic_semester_name_year"));
        }

        let now = Utc::now();
        let semester = AcademicSemester {
            id: AcademicSemesterId::new(),
            name: dto.name,
            code: dto.code,
            year: dto.year,
            start_month: dto.start_month,
            end_month: dto.end_month,
            created_at: now,
            updated_at: now,
        };
        state.academic_semesters.push(semester.clone());
        Ok(semester)
    }

    async fn list_academic_semesters(
        &self,
        limit: i64,
        offset: i64,
    ) -> RepositoryResult<(Vec<AcademicSemester>, i64)> {
        let state = self.inner.read()?;
        let mut semesters: Vec<&AcademicSemester> = state.academic_semesters.iter().collect();
        semesters.sort_by(|a, b| b.year.cmp(&a.year).then(a.code.cmp(&b.code)));
        Ok(paginate(semesters, limit, offset))
    }

    async fn insert_academic_faculty(
        &self,
        dto: &CreateAcademicFacultyDto,
    ) -> RepositoryResult<AcademicFaculty> {
        let name = dto.name.trim();
        let mut state = self.inner.write()?;
        if state.academic_faculties.iter().any(|f| f.name == name) {
            return Err(unique_violation("unique_academic_faculty_name"));
        }

        let now = Utc::now();
        let faculty = AcademicFaculty {
            id: AcademicFacultyId::new(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        state.academic_faculties.push(faculty.clone());
        Ok(faculty)
    }

    async fn list_academic_faculties(
        &self,
        limit: i64,
        offset: i64,
    ) -> RepositoryResult<(Vec<AcademicFaculty>, i64)> {
        let state = self.inner.read()?;
        let mut faculties: Vec<&AcademicFaculty> = state.academic_faculties.iter().collect();
        faculties.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(paginate(faculties, limit, offset))
    }

    async fn insert_academic_department(
        &self,
        dto: &CreateAcademicDepartmentDto,
    ) -> RepositoryResult<AcademicDepartment> {
        let name = dto.name.trim();
        let mut state = self.inner.write()?;
        if state.academic_departments.iter().any(|d| d.name == name) {
            return Err(unique_violation("unique_academic_department_name"));
        }

        let now = Utc::now();
        let department = AcademicDepartment {
            id: AcademicDepartmentId::new(),
            name: name.to_string(),
            academic_faculty_id: dto.academic_faculty_id,
            created_at: now,
            updated_at: now,
        };
        state.academic_departments.push(department.clone());
        Ok(department)
    }

    async fn list_academic_departments(
        &self,
        filter: &AcademicDepartmentFilterParams,
    ) -> RepositoryResult<(Vec<AcademicDepartment>, i64)> {
        let state = self.inner.read()?;
        let mut departments: Vec<&AcademicDepartment> = state
            .academic_departments
            .iter()
            .filter(|d| {
                filter
                    .academic_faculty_id
                    .is_none_or(|id| d.academic_faculty_id == id)
            })
            .collect();
        departments.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(paginate(
            departments,
            filter.pagination.limit(),
            filter.pagination.offset(),
        ))
    }

    async fn insert_course(&self, dto: &CreateCourseDto) -> RepositoryResult<Course> {
        let title = dto.title.trim();
        let mut state = self.inner.write()?;
        if state.courses.iter().any(|c| c.title == title) {
            return Err(unique_violation("unique_course_title"));
        }

        let now = Utc::now();
        let course = Course {
            id: CourseId::new(),
            title: title.to_string(),
            prefix: dto.prefix.trim().to_string(),
            code: dto.code,
            credits: dto.credits,
            created_at: now,
            updated_at: now,
        };
        state.courses.push(course.clone());
        Ok(course)
    }

    async fn list_courses(&self, limit: i64, offset: i64) -> RepositoryResult<(Vec<Course>, i64)> {
        let state = self.inner.read()?;
        let mut courses: Vec<&Course> = state.courses.iter().collect();
        courses.sort_by(|a, b| a.prefix.cmp(&b.prefix).then(a.code.cmp(&b.code)));
        Ok(paginate(courses, limit, offset))
    }

    async fn update_course(
        &self,
        id: CourseId,
        dto: &UpdateCourseDto,
    ) -> RepositoryResult<Option<Course>> {
        let title = dto.title.as_deref().map(str::trim);
        let mut state = self.inner.write()?;
        if let Some(title) = title
            && state.courses.iter().any(|c| c.id != id && c.title == title)
        {
            return Err(unique_violation("unique_course_title"));
        }

        let Some(course) = state.courses.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        if let Some(title) = title {
            course.title = title.to_string();
        }
        if let Some(prefix) = &dto.prefix {
            course.prefix = prefix.trim().to_string();
        }
        if let Some(code) = dto.code {
            course.code = code;
        }
        if let Some(credits) = dto.credits {
            course.credits = credits;
        }
        course.updated_at = Utc::now();
        Ok(Some(course.clone()))
    }

    async fn delete_course(&self, id: CourseId) -> RepositoryResult<Option<Course>> {
        let mut state = self.inner.write()?;
        if state.offered_courses.iter().any(|o| o.course_id == id) {
            return Err(RepositoryError::ForeignKeyViolation(
                "offered_courses_course_id_fkey".to_string(),
            ));
        }
        let Some(index) = state.courses.iter().position(|c| c.id == id) else {
            return Ok(None);
        };
        state.course_faculties.retain(|(course, _)| *course != id);
        Ok(Some(state.courses.remove(index)))
    }

    async fn add_course_faculties(
        &self,
        course_id: CourseId,
        faculties: &[FacultyId],
    ) -> RepositoryResult<Vec<FacultyId>> {
        let mut state = self.inner.write()?;
        for faculty_id in faculties {
            let link = (course_id, *faculty_id);
            if !state.course_faculties.contains(&link) {
                state.course_faculties.push(link);
            }
        }
        Ok(eligible_faculties(&state, course_id))
    }

    async fn remove_course_faculties(
        &self,
        course_id: CourseId,
        faculties: &[FacultyId],
    ) -> RepositoryResult<Vec<FacultyId>> {
        let mut state = self.inner.write()?;
        state
            .course_faculties
            .retain(|(course, faculty)| *course != course_id || !faculties.contains(faculty));
        Ok(eligible_faculties(&state, course_id))
    }

    async fn course_faculties(&self, course_id: CourseId) -> RepositoryResult<Vec<FacultyId>> {
        let state = self.inner.read()?;
        Ok(eligible_faculties(&state, course_id))
    }

    async fn insert_semester_registration(
        &self,
        new: &NewSemesterRegistration,
    ) -> RepositoryResult<SemesterRegistration> {
        let mut state = self.inner.write()?;
        if state
            .semester_registrations
            .iter()
            .any(|r| r.academic_semester_id == new.academic_semester_id)
        {
            return Err(unique_violation("unique_semester_registration_semester"));
        }

        let now = Utc::now();
        let registration = SemesterRegistration {
            id: SemesterRegistrationId::new(),
            academic_semester_id: new.academic_semester_id,
            status: new.status,
            start_date: new.start_date,
            end_date: new.end_date,
            min_credit: new.min_credit,
            max_credit: new.max_credit,
            created_at: now,
            updated_at: now,
        };
        state.semester_registrations.push(registration.clone());
        Ok(registration)
    }

    async fn list_semester_registrations(
        &self,
        filter: &SemesterRegistrationFilterParams,
    ) -> RepositoryResult<(Vec<SemesterRegistration>, i64)> {
        let state = self.inner.read()?;
        // Newest first, like the SQL ordering on created_at DESC.
        let registrations: Vec<&SemesterRegistration> = state
            .semester_registrations
            .iter()
            .rev()
            .filter(|r| filter.status.is_none_or(|status| r.status == status))
            .filter(|r| {
                filter
                    .academic_semester_id
                    .is_none_or(|id| r.academic_semester_id == id)
            })
            .collect();
        Ok(paginate(
            registrations,
            filter.pagination.limit(),
            filter.pagination.offset(),
        ))
    }

    async fn update_semester_registration(
        &self,
        id: SemesterRegistrationId,
        dto: &UpdateSemesterRegistrationDto,
    ) -> RepositoryResult<Option<SemesterRegistration>> {
        // Waits for open schedule units, which read the status under this lock.
        let _guard = self.inner.schedule_lock.lock().await;
        let mut state = self.inner.write()?;
        let Some(registration) = state.semester_registrations.iter_mut().find(|r| r.id == id)
        else {
            return Ok(None);
        };

        if let Some(status) = dto.status {
            registration.status = status;
        }
        if let Some(start_date) = dto.start_date {
            registration.start_date = start_date;
        }
        if let Some(end_date) = dto.end_date {
            registration.end_date = end_date;
        }
        if let Some(min_credit) = dto.min_credit {
            registration.min_credit = min_credit;
        }
        if let Some(max_credit) = dto.max_credit {
            registration.max_credit = max_credit;
        }
        registration.updated_at = Utc::now();

        Ok(Some(registration.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusbyte_core::PaginationParams;

    fn course_dto(title: &str) -> CreateCourseDto {
        CreateCourseDto {
            title: title.to_string(),
            prefix: "CSE".to_string(),
            code: 101,
            credits: 3,
        }
    }

    #[tokio::test]
    async fn test_duplicate_course_title_is_unique_violation() {
        let store = MemoryStore::new();
        store.insert_course(&course_dto("Data Structures")).await.unwrap();

        let err = store
            .insert_course(&course_dto("Data Structures"))
            .await
            .unwrap_err();
        assert_eq!(err.unique_constraint(), Some("unique_course_title"));
    }

    #[tokio::test]
    async fn test_update_course_title_stays_unique() {
        let store = MemoryStore::new();
        store.insert_course(&course_dto("Compilers")).await.unwrap();
        let course = store.insert_course(&course_dto("Databases")).await.unwrap();

        let same_title = UpdateCourseDto {
            title: Some(" Databases ".into()),
            credits: Some(4),
            ..Default::default()
        };
        let updated = store.update_course(course.id, &same_title).await.unwrap().unwrap();
        assert_eq!(updated.title, "Databases");
        assert_eq!(updated.credits, 4);

        let taken = UpdateCourseDto {
            title: Some("Compilers".into()),
            ..Default::default()
        };
        let err = store.update_course(course.id, &taken).await.unwrap_err();
        assert_eq!(err.unique_constraint(), Some("unique_course_title"));

        let missing = store
            .update_course(CourseId::new(), &UpdateCourseDto::default())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_delete_course_drops_eligibility_rows() {
        let store = MemoryStore::new();
        let course = store.insert_course(&course_dto("Networks")).await.unwrap();
        store
            .add_course_faculties(course.id, &[FacultyId::from_u128(1)])
            .await
            .unwrap();

        let deleted = store.delete_course(course.id).await.unwrap().unwrap();
        assert_eq!(deleted.id, course.id);
        assert!(store.course_faculties(course.id).await.unwrap().is_empty());
        assert!(store.delete_course(course.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_course_faculties_add_is_idempotent_and_remove_keeps_rest() {
        let store = MemoryStore::new();
        let course = store.insert_course(&course_dto("Algorithms")).await.unwrap();
        let a = FacultyId::from_u128(1);
        let b = FacultyId::from_u128(2);

        store.add_course_faculties(course.id, &[a, b]).await.unwrap();
        let listed = store.add_course_faculties(course.id, &[a]).await.unwrap();
        assert_eq!(listed, vec![a, b]);

        let remaining = store.remove_course_faculties(course.id, &[a]).await.unwrap();
        assert_eq!(remaining, vec![b]);
    }

    #[tokio::test]
    async fn test_department_filter_by_faculty() {
        let store = MemoryStore::new();
        let science = store
            .insert_academic_faculty(&CreateAcademicFacultyDto {
                name: "Science".into(),
            })
            .await
            .unwrap();
        let arts = store
            .insert_academic_faculty(&CreateAcademicFacultyDto { name: "Arts".into() })
            .await
            .unwrap();
        for (name, faculty) in [("Physics", science.id), ("History", arts.id)] {
            store
                .insert_academic_department(&CreateAcademicDepartmentDto {
                    name: name.into(),
                    academic_faculty_id: faculty,
                })
                .await
                .unwrap();
        }

        let filter = AcademicDepartmentFilterParams {
            academic_faculty_id: Some(science.id),
            pagination: PaginationParams::default(),
        };
        let (departments, total) = store.list_academic_departments(&filter).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(departments[0].name, "Physics");
    }
}
