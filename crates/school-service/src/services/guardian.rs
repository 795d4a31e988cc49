//! Guardian service

use school_core::entities::{Guardian, GuardianChanges, NewGuardian};
use school_core::traits::RecordScope;
use school_core::DomainError;
use tracing::{info, instrument};

use crate::dto::{CreateGuardianRequest, GuardianResponse, UpdateGuardianRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Guardian service
pub struct GuardianService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> GuardianService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All active guardians, or those matching a phone number.
    ///
    /// Phone numbers match on their trailing digits, so local and
    /// international spellings find the same guardian. A phone filter that
    /// matches nothing is `GuardianNotFound`.
    #[instrument(skip(self))]
    pub async fn list(&self, phone: Option<&str>) -> ServiceResult<Vec<GuardianResponse>> {
        let guardians = match phone.map(str::trim).filter(|p| !p.is_empty()) {
            Some(phone) => {
                let suffix = Guardian::phone_suffix(phone);
                if suffix.is_empty() {
                    return Err(DomainError::GuardianNotFound.into());
                }
                let found = self.ctx.guardian_repo().find_by_phone_suffix(&suffix).await?;
                if found.is_empty() {
                    return Err(DomainError::GuardianNotFound.into());
                }
                found
            }
            None => self.ctx.guardian_repo().list().await?,
        };

        Ok(guardians.into_iter().map(GuardianResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> ServiceResult<GuardianResponse> {
        let guardian = self
            .ctx
            .guardian_repo()
            .find_by_id(id, RecordScope::Active)
            .await?
            .ok_or(DomainError::GuardianNotFound)?;

        Ok(GuardianResponse::from(guardian))
    }

    #[instrument(skip(self, request), fields(phone = %request.phone))]
    pub async fn create(&self, request: CreateGuardianRequest) -> ServiceResult<GuardianResponse> {
        let guardian = self.ctx.guardian_repo().create(&NewGuardian::from(request)).await?;
        info!(guardian_id = guardian.id, "Guardian created");
        Ok(GuardianResponse::from(guardian))
    }

    #[instrument(skip(self, request))]
    pub async fn update(&self, id: i64, request: UpdateGuardianRequest) -> ServiceResult<GuardianResponse> {
        let guardian = self
            .ctx
            .guardian_repo()
            .update(id, &GuardianChanges::from(request))
            .await?;
        info!(guardian_id = id, "Guardian updated");
        Ok(GuardianResponse::from(guardian))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        self.ctx.guardian_repo().delete(id).await?;
        info!(guardian_id = id, "Guardian deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn restore(&self, id: i64) -> ServiceResult<GuardianResponse> {
        let guardian = self.ctx.guardian_repo().restore(id).await?;
        info!(guardian_id = id, "Guardian restored");
        Ok(GuardianResponse::from(guardian))
    }
}
