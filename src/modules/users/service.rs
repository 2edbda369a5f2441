use anyhow::anyhow;
use tracing::instrument;

use campusbyte_config::ProvisioningConfig;
use campusbyte_core::{AppError, hash_password_with_cost};
use campusbyte_db::{AccountStore, AccountTransaction, ById};
use campusbyte_models::academic::{AcademicDepartment, AcademicSemester};
use campusbyte_observability::track_account_provisioned;

use crate::modules::users::id_generator::{IdScheme, generate_login_id};
use crate::modules::users::model::{
    AdminAccount, AdminProfileDto, FacultyAccount, FacultyProfileDto, NewProfile, NewUser,
    ProfileOwner, ProvisionedAccount, ProvisionedProfile, StudentAccount, StudentProfileDto,
};
use crate::utils::referential::require;

pub struct UserService;

impl UserService {
    #[instrument(skip(store, config, password))]
    pub async fn create_student<S>(
        store: &S,
        config: &ProvisioningConfig,
        password: Option<&str>,
        student: StudentProfileDto,
    ) -> Result<StudentAccount, AppError>
    where
        S: AccountStore + ?Sized,
    {
        match Self::provision(store, config, password, NewProfile::Student(student)).await? {
            ProvisionedAccount {
                user,
                profile: ProvisionedProfile::Student(student),
            } => Ok(StudentAccount { user, student }),
            _ => Err(AppError::creation_failed("student")),
        }
    }

    #[instrument(skip(store, config, password))]
    pub async fn create_faculty<S>(
        store: &S,
        config: &ProvisioningConfig,
        password: Option<&str>,
        faculty: FacultyProfileDto,
    ) -> Result<FacultyAccount, AppError>
    where
        S: AccountStore + ?Sized,
    {
        match Self::provision(store, config, password, NewProfile::Faculty(faculty)).await? {
            ProvisionedAccount {
                user,
                profile: ProvisionedProfile::Faculty(faculty),
            } => Ok(FacultyAccount { user, faculty }),
            _ => Err(AppError::creation_failed("faculty")),
        }
    }

    #[instrument(skip(store, config, password))]
    pub async fn create_admin<S>(
        store: &S,
        config: &ProvisioningConfig,
        password: Option<&str>,
        admin: AdminProfileDto,
    ) -> Result<AdminAccount, AppError>
    where
        S: AccountStore + ?Sized,
    {
        match Self::provision(store, config, password, NewProfile::Admin(admin)).await? {
            ProvisionedAccount {
                user,
                profile: ProvisionedProfile::Admin(admin),
            } => Ok(AdminAccount { user, admin }),
            _ => Err(AppError::creation_failed("admin")),
        }
    }

    /// Creates a user and its profile in one transaction.
    ///
    /// Falls back to the configured default password when none is supplied
    /// and flags the account for a password change. Nothing is left behind
    /// when any step fails.
    #[instrument(skip_all, fields(role = %profile.role()))]
    pub async fn provision<S>(
        store: &S,
        config: &ProvisioningConfig,
        password: Option<&str>,
        profile: NewProfile,
    ) -> Result<ProvisionedAccount, AppError>
    where
        S: AccountStore + ?Sized,
    {
        let role = profile.role();
        let (password, needs_password_change) = config.effective_password(password);
        let password_hash = hash_password_with_cost(password, config.bcrypt_cost)?;

        let mut tx = store.begin_account_transaction().await?;
        let result = create_in_transaction(
            store,
            tx.as_mut(),
            password_hash,
            needs_password_change,
            profile,
        )
        .await;

        let account = match result {
            Ok(account) => {
                tx.commit().await?;
                account
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!(error = %rollback_err, "Failed to roll back account transaction");
                }
                return Err(err);
            }
        };

        track_account_provisioned(role.as_str());
        tracing::info!(
            user_id = %account.user.id,
            login_id = %account.user.login_id,
            needs_password_change,
            "Account provisioned"
        );
        Ok(account)
    }
}

async fn create_in_transaction<S>(
    store: &S,
    tx: &mut dyn AccountTransaction,
    password_hash: String,
    needs_password_change: bool,
    profile: NewProfile,
) -> Result<ProvisionedAccount, AppError>
where
    S: AccountStore + ?Sized,
{
    let role = profile.role();

    let scheme = match &profile {
        NewProfile::Student(dto) => {
            let semester = require(
                store,
                &ById::<AcademicSemester>::new(dto.admission_semester_id),
                "Admission semester not found",
            )
            .await?;
            IdScheme::for_admission(&semester)
        }
        NewProfile::Faculty(_) => IdScheme::Faculty,
        NewProfile::Admin(_) => IdScheme::Admin,
    };
    let login_id = generate_login_id(tx, scheme).await?;

    if let Some(department_id) = profile.academic_department_id() {
        require(
            store,
            &ById::<AcademicDepartment>::new(department_id),
            "Academic department does not exists",
        )
        .await?;
    }

    let user = tx
        .insert_user(&NewUser {
            login_id,
            password_hash,
            needs_password_change,
            role,
        })
        .await?
        .ok_or_else(|| AppError::creation_failed("user"))?;

    let owner = ProfileOwner::from(&user);
    let created = match &profile {
        NewProfile::Student(dto) => tx
            .insert_student(&owner, dto)
            .await?
            .map(ProvisionedProfile::Student),
        NewProfile::Faculty(dto) => tx
            .insert_faculty(&owner, dto)
            .await?
            .map(ProvisionedProfile::Faculty),
        NewProfile::Admin(dto) => tx
            .insert_admin(&owner, dto)
            .await?
            .map(ProvisionedProfile::Admin),
    };
    let profile = created.ok_or_else(|| AppError::creation_failed(role.as_str()))?;

    Ok(ProvisionedAccount { user, profile })
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusbyte_core::ErrorKind;
    use campusbyte_db::MemoryStore;
    use campusbyte_models::value_types::Gender;

    fn config() -> ProvisioningConfig {
        ProvisioningConfig {
            default_password: "campus-default-pass".into(),
            bcrypt_cost: 4,
        }
    }

    fn admin(email: &str) -> AdminProfileDto {
        AdminProfileDto {
            designation: "Registrar".into(),
            first_name: "Ada".into(),
            middle_name: None,
            last_name: "Obi".into(),
            gender: Gender::Female,
            date_of_birth: None,
            email: email.into(),
            contact_no: "01700000000".into(),
            emergency_contact_no: "01800000000".into(),
            present_address: "12 Campus Road".into(),
            permanent_address: "12 Campus Road".into(),
        }
    }

    #[tokio::test]
    async fn test_admin_ids_count_up() {
        let store = MemoryStore::new();
        let first = UserService::create_admin(&store, &config(), None, admin("a@uni.edu"))
            .await
            .unwrap();
        let second =
            UserService::create_admin(&store, &config(), Some("chosen"), admin("b@uni.edu"))
                .await
                .unwrap();

        assert_eq!(first.user.login_id, "A-0001");
        assert_eq!(first.admin.login_id, "A-0001");
        assert_eq!(first.admin.user_id, first.user.id);
        assert!(first.user.needs_password_change);

        assert_eq!(second.user.login_id, "A-0002");
        assert!(!second.user.needs_password_change);
    }

    #[tokio::test]
    async fn test_failed_profile_leaves_no_user() {
        let store = MemoryStore::new();
        UserService::create_admin(&store, &config(), None, admin("same@uni.edu"))
            .await
            .unwrap();

        let err = UserService::create_admin(&store, &config(), None, admin("same@uni.edu"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::CreationFailed);
        assert_eq!(err.message(), "Failed to create admin");
        assert_eq!(store.users().len(), 1);
        assert_eq!(store.admins().len(), 1);

        let next = UserService::create_admin(&store, &config(), None, admin("c@uni.edu"))
            .await
            .unwrap();
        assert_eq!(next.user.login_id, "A-0002");
    }
}
