use async_trait::async_trait;
use campusbyte_models::users::{
    Admin, AdminProfileDto, Faculty, FacultyProfileDto, NewUser, ProfileOwner, Student,
    StudentProfileDto, User,
};
use sqlx::{Postgres, Transaction};

use super::{FACULTY_COLUMNS, PgStore};
use crate::error::RepositoryResult;
use crate::repository::{AccountStore, AccountTransaction};

const USER_COLUMNS: &str = "id, login_id, password_hash, needs_password_change, role, status, is_deleted, created_at, updated_at";
const STUDENT_COLUMNS: &str = "id, login_id, user_id, first_name, middle_name, last_name, gender, date_of_birth, email, contact_no, emergency_contact_no, present_address, permanent_address, father_name, father_occupation, father_contact_no, mother_name, mother_occupation, mother_contact_no, local_guardian_name, local_guardian_occupation, local_guardian_contact_no, local_guardian_address, blood_group, profile_img, admission_semester_id, academic_department_id, is_deleted, created_at, updated_at";
const ADMIN_COLUMNS: &str = "id, login_id, user_id, designation, first_name, middle_name, last_name, gender, date_of_birth, email, contact_no, emergency_contact_no, present_address, permanent_address, is_deleted, created_at, updated_at";

#[async_trait]
impl AccountStore for PgStore {
    async fn begin_account_transaction(&self) -> RepositoryResult<Box<dyn AccountTransaction>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgAccountTransaction { tx }))
    }
}

pub struct PgAccountTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl AccountTransaction for PgAccountTransaction {
    async fn next_login_sequence(&mut self, scope: &str) -> RepositoryResult<i64> {
        // The row lock taken by the upsert serializes concurrent callers per scope.
        let next = sqlx::query_scalar::<_, i64>(
            r#"INSERT INTO user_id_sequences (scope, last_value) VALUES ($1, 1)
               ON CONFLICT (scope)
               DO UPDATE SET last_value = user_id_sequences.last_value + 1
               RETURNING last_value"#,
        )
        .bind(scope)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(next)
    }

    async fn insert_user(&mut self, user: &NewUser) -> RepositoryResult<Option<User>> {
        let sql = format!(
            r#"INSERT INTO users (login_id, password_hash, needs_password_change, role)
               VALUES ($1, $2, $3, $4)
               ON CONFLICT DO NOTHING
               RETURNING {}"#,
            USER_COLUMNS
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(&user.login_id)
            .bind(&user.password_hash)
            .bind(user.needs_password_change)
            .bind(user.role)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(user)
    }

    async fn insert_student(
        &mut self,
        owner: &ProfileOwner,
        profile: &StudentProfileDto,
    ) -> RepositoryResult<Option<Student>> {
        let sql = format!(
            r#"INSERT INTO students
                   (login_id, user_id, first_name, middle_name, last_name, gender, date_of_birth,
                    email, contact_no, emergency_contact_no, present_address, permanent_address,
                    father_name, father_occupation, father_contact_no,
                    mother_name, mother_occupation, mother_contact_no,
                    local_guardian_name, local_guardian_occupation, local_guardian_contact_no,
                    local_guardian_address, blood_group, profile_img,
                    admission_semester_id, academic_department_id)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                       $17, $18, $19, $20, $21, $22, $23, $24, $25, $26)
               ON CONFLICT DO NOTHING
               RETURNING {}"#,
            STUDENT_COLUMNS
        );
        let student = sqlx::query_as::<_, Student>(&sql)
            .bind(&owner.login_id)
            .bind(owner.user_id)
            .bind(&profile.first_name)
            .bind(&profile.middle_name)
            .bind(&profile.last_name)
            .bind(profile.gender)
            .bind(profile.date_of_birth)
            .bind(&profile.email)
            .bind(&profile.contact_no)
            .bind(&profile.emergency_contact_no)
            .bind(&profile.present_address)
            .bind(&profile.permanent_address)
            .bind(&profile.guardian.father_name)
            .bind(&profile.guardian.father_occupation)
            .bind(&profile.guardian.father_contact_no)
            .bind(&profile.guardian.mother_name)
            .bind(&profile.guardian.mother_occupation)
            .bind(&profile.guardian.mother_contact_no)
            .bind(&profile.local_guardian.name)
            .bind(&profile.local_guardian.occupation)
            .bind(&profile.local_guardian.contact_no)
            .bind(&profile.local_guardian.address)
            .bind(profile.blood_group)
            .bind(&profile.profile_img)
            .bind(profile.admission_semester_id)
            .bind(profile.academic_department_id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(student)
    }

    async fn insert_faculty(
        &mut self,
        owner: &ProfileOwner,
        profile: &FacultyProfileDto,
    ) -> RepositoryResult<Option<Faculty>> {
        let sql = format!(
            r#"INSERT INTO faculties
                   (login_id, user_id, designation, first_name, middle_name, last_name, gender,
                    date_of_birth, email, contact_no, emergency_contact_no, present_address,
                    permanent_address, academic_department_id)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
               ON CONFLICT DO NOTHING
               RETURNING {}"#,
            FACULTY_COLUMNS
        );
        let faculty = sqlx::query_as::<_, Faculty>(&sql)
            .bind(&owner.login_id)
            .bind(owner.user_id)
            .bind(&profile.designation)
            .bind(&profile.first_name)
            .bind(&profile.middle_name)
            .bind(&profile.last_name)
            .bind(profile.gender)
            .bind(profile.date_of_birth)
            .bind(&profile.email)
            .bind(&profile.contact_no)
            .bind(&profile.emergency_contact_no)
            .bind(&profile.present_address)
            .bind(&profile.permanent_address)
            .bind(profile.academic_department_id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(faculty)
    }

    async fn insert_admin(
        &mut self,
        owner: &ProfileOwner,
        profile: &AdminProfileDto,
    ) -> RepositoryResult<Option<Admin>> {
        let sql = format!(
            r#"INSERT INTO admins
                   (login_id, user_id, designation, first_name, middle_name, last_name, gender,
                    date_of_birth, email, contact_no, emergency_contact_no, present_address,
                    permanent_address)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
               ON CONFLICT DO NOTHING
               RETURNING {}"#,
            ADMIN_COLUMNS
        );
        let admin = sqlx::query_as::<_, Admin>(&sql)
            .bind(&owner.login_id)
            .bind(owner.user_id)
            .bind(&profile.designation)
            .bind(&profile.first_name)
            .bind(&profile.middle_name)
            .bind(&profile.last_name)
            .bind(profile.gender)
            .bind(profile.date_of_birth)
            .bind(&profile.email)
            .bind(&profile.contact_no)
            .bind(&profile.emergency_contact_no)
            .bind(&profile.present_address)
            .bind(&profile.permanent_address)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(admin)
    }

    async fn commit(self: Box<Self>) -> RepositoryResult<()> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> RepositoryResult<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}
