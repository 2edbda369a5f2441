use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use campusbyte_models::ids::{AdminId, FacultyId, StudentId, UserId};
use campusbyte_models::users::{
    Admin, AdminProfileDto, Faculty, FacultyProfileDto, NewUser, ProfileOwner, Student,
    StudentProfileDto, User,
};
use campusbyte_models::value_types::UserStatus;
use chrono::Utc;
use tokio::sync::OwnedMutexGuard;

use super::{Inner, MemoryStore};
use crate::error::RepositoryResult;
use crate::repository::{AccountStore, AccountTransaction};

#[async_trait]
impl AccountStore for MemoryStore {
    async fn begin_account_transaction(&self) -> RepositoryResult<Box<dyn AccountTransaction>> {
        let guard = Arc::clone(&self.inner.account_lock).lock_owned().await;
        Ok(Box::new(MemoryAccountTransaction {
            inner: Arc::clone(&self.inner),
            _guard: guard,
            sequences: HashMap::new(),
            users: Vec::new(),
            students: Vec::new(),
            faculties: Vec::new(),
            admins: Vec::new(),
        }))
    }
}

/// Staged account writes. Applied together on commit, dropped otherwise.
struct MemoryAccountTransaction {
    inner: Arc<Inner>,
    _guard: OwnedMutexGuard<()>,
    sequences: HashMap<String, i64>,
    users: Vec<User>,
    students: Vec<Student>,
    faculties: Vec<Faculty>,
    admins: Vec<Admin>,
}

/// Whether a profile in one table clashes on login id, user or email.
/// Each role keeps its own uniqueness, matching the per-table constraints.
fn profile_taken<'a>(
    mut profiles: impl Iterator<Item = (&'a str, UserId, &'a str)>,
    owner: &ProfileOwner,
    email: &str,
) -> bool {
    profiles.any(|(login_id, user_id, other_email)| {
        login_id == owner.login_id || user_id == owner.user_id || other_email == email
    })
}

impl MemoryAccountTransaction {
    fn student_taken(&self, owner: &ProfileOwner, email: &str) -> RepositoryResult<bool> {
        let state = self.inner.read()?;
        let rows = state.students.iter().chain(&self.students);
        Ok(profile_taken(
            rows.map(|p| (p.login_id.as_str(), p.user_id, p.email.as_str())),
            owner,
            email,
        ))
    }

    fn faculty_taken(&self, owner: &ProfileOwner, email: &str) -> RepositoryResult<bool> {
        let state = self.inner.read()?;
        let rows = state.faculties.iter().chain(&self.faculties);
        Ok(profile_taken(
            rows.map(|p| (p.login_id.as_str(), p.user_id, p.email.as_str())),
            owner,
            email,
        ))
    }

    fn admin_taken(&self, owner: &ProfileOwner, email: &str) -> RepositoryResult<bool> {
        let state = self.inner.read()?;
        let rows = state.admins.iter().chain(&self.admins);
        Ok(profile_taken(
            rows.map(|p| (p.login_id.as_str(), p.user_id, p.email.as_str())),
            owner,
            email,
        ))
    }
}

#[async_trait]
impl AccountTransaction for MemoryAccountTransaction {
    async fn next_login_sequence(&mut self, scope: &str) -> RepositoryResult<i64> {
        let last = match self.sequences.get(scope) {
            Some(last) => *last,
            None => {
                let state = self.inner.read()?;
                state.login_sequences.get(scope).copied().unwrap_or(0)
            }
        };
        let next = last + 1;
        self.sequences.insert(scope.to_string(), next);
        Ok(next)
    }

    async fn insert_user(&mut self, user: &NewUser) -> RepositoryResult<Option<User>> {
        let taken = {
            let state = self.inner.read()?;
            state
                .users
                .iter()
                .chain(&self.users)
                .any(|u| u.login_id == user.login_id)
        };
        if taken {
            return Ok(None);
        }

        let now = Utc::now();
        let created = User {
            id: UserId::new(),
            login_id: user.login_id.clone(),
            password_hash: user.password_hash.clone(),
            needs_password_change: user.needs_password_change,
            role: user.role,
            status: UserStatus::InProgress,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };
        self.users.push(created.clone());
        Ok(Some(created))
    }

    async fn insert_student(
        &mut self,
        owner: &ProfileOwner,
        profile: &StudentProfileDto,
    ) -> RepositoryResult<Option<Student>> {
        if self.student_taken(owner, &profile.email)? {
            return Ok(None);
        }

        let now = Utc::now();
        let student = Student {
            id: StudentId::new(),
            login_id: owner.login_id.clone(),
            user_id: owner.user_id,
            first_name: profile.first_name.clone(),
            middle_name: profile.middle_name.clone(),
            last_name: profile.last_name.clone(),
            gender: profile.gender,
            date_of_birth: profile.date_of_birth,
            email: profile.email.clone(),
            contact_no: profile.contact_no.clone(),
            emergency_contact_no: profile.emergency_contact_no.clone(),
            present_address: profile.present_address.clone(),
            permanent_address: profile.permanent_address.clone(),
            guardian: profile.guardian.clone(),
            local_guardian: profile.local_guardian.clone(),
            blood_group: profile.blood_group,
            profile_img: profile.profile_img.clone(),
            admission_semester_id: profile.admission_semester_id,
            academic_department_id: profile.academic_department_id,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };
        self.students.push(student.clone());
        Ok(Some(student))
    }

    async fn insert_faculty(
        &mut self,
        owner: &ProfileOwner,
        profile: &FacultyProfileDto,
    ) -> RepositoryResult<Option<Faculty>> {
        if self.faculty_taken(owner, &profile.email)? {
            return Ok(None);
        }

        let now = Utc::now();
        let faculty = Faculty {
            id: FacultyId::new(),
            login_id: owner.login_id.clone(),
            user_id: owner.user_id,
            designation: profile.designation.clone(),
            first_name: profile.first_name.clone(),
            middle_name: profile.middle_name.clone(),
            last_name: profile.last_name.clone(),
            gender: profile.gender,
            date_of_birth: profile.date_of_birth,
            email: profile.email.clone(),
            contact_no: profile.contact_no.clone(),
            emergency_contact_no: profile.emergency_contact_no.clone(),
            present_address: profile.present_address.clone(),
            permanent_address: profile.permanent_address.clone(),
            academic_department_id: profile.academic_department_id,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };
        self.faculties.push(faculty.clone());
        Ok(Some(faculty))
    }

    async fn insert_admin(
        &mut self,
        owner: &ProfileOwner,
        profile: &AdminProfileDto,
    ) -> RepositoryResult<Option<Admin>> {
        if self.admin_taken(owner, &profile.email)? {
            return Ok(None);
        }

        let now = Utc::now();
        let admin = Admin {
            id: AdminId::new(),
            login_id: owner.login_id.clone(),
            user_id: owner.user_id,
            designation: profile.designation.clone(),
            first_name: profile.first_name.clone(),
            middle_name: profile.middle_name.clone(),
            last_name: profile.last_name.clone(),
            gender: profile.gender,
            date_of_birth: profile.date_of_birth,
            email: profile.email.clone(),
            contact_no: profile.contact_no.clone(),
            emergency_contact_no: profile.emergency_contact_no.clone(),
            present_address: profile.present_address.clone(),
            permanent_address: profile.permanent_address.clone(),
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };
        self.admins.push(admin.clone());
        Ok(Some(admin))
    }

    async fn commit(self: Box<Self>) -> RepositoryResult<()> {
        let this = *self;
        let mut state = this.inner.write()?;
        state.login_sequences.extend(this.sequences);
        state.users.extend(this.users);
        state.students.extend(this.students);
        state.faculties.extend(this.faculties);
        state.admins.extend(this.admins);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> RepositoryResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusbyte_models::value_types::UserRole;

    fn new_user(login_id: &str) -> NewUser {
        NewUser {
            login_id: login_id.to_string(),
            password_hash: "hash".to_string(),
            needs_password_change: true,
            role: UserRole::Admin,
        }
    }

    #[tokio::test]
    async fn test_sequence_starts_at_one_and_survives_commit() {
        let store = MemoryStore::new();

        let mut tx = store.begin_account_transaction().await.unwrap();
        assert_eq!(tx.next_login_sequence("A").await.unwrap(), 1);
        assert_eq!(tx.next_login_sequence("A").await.unwrap(), 2);
        assert_eq!(tx.next_login_sequence("F").await.unwrap(), 1);
        tx.commit().await.unwrap();

        let mut tx = store.begin_account_transaction().await.unwrap();
        assert_eq!(tx.next_login_sequence("A").await.unwrap(), 3);
        tx.rollback().await.unwrap();
    }

    #[tokio::test]
    async fn test_rollback_discards_user_and_sequence() {
        let store = MemoryStore::new();

        let mut tx = store.begin_account_transaction().await.unwrap();
        tx.next_login_sequence("A").await.unwrap();
        assert!(tx.insert_user(&new_user("A-0001")).await.unwrap().is_some());
        tx.rollback().await.unwrap();

        assert!(store.users().is_empty());
        let mut tx = store.begin_account_transaction().await.unwrap();
        assert_eq!(tx.next_login_sequence("A").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_login_id_returns_none() {
        let store = MemoryStore::new();

        let mut tx = store.begin_account_transaction().await.unwrap();
        tx.insert_user(&new_user("A-0001")).await.unwrap();
        assert!(tx.insert_user(&new_user("A-0001")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_uncommitted_writes_are_invisible() {
        let store = MemoryStore::new();

        let mut tx = store.begin_account_transaction().await.unwrap();
        tx.insert_user(&new_user("A-0001")).await.unwrap();
        assert!(store.users().is_empty());
        tx.commit().await.unwrap();
        assert_eq!(store.users().len(), 1);
    }
}
