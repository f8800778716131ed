use crate::api::client::Backend;
use crate::core::error::ApiError;
use crate::models::course::{Course, CourseForm};
use crate::models::schedule::ScheduleSlot;
use crate::models::section::Section;
use crate::models::user::{PasswordChangeForm, ProfileForm, User};
use crate::stores::query_cache::QueryCache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::info;

const COURSES: &str = "/cursos";
const SECTIONS: &str = "/secciones";
const SCHEDULES: &str = "/horarios";
const USERS: &str = "/usuarios";

fn course_key(id: u32) -> String {
    format!("{}/{}", COURSES, id)
}

fn user_key(id: u32) -> String {
    format!("{}/{}", USERS, id)
}

/// Number of cached keys per entity
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub courses: usize,
    pub sections: usize,
    pub schedules: usize,
    pub users: usize,
}

/// Entity kinds a widget can subscribe to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    Courses,
    Sections,
    Schedules,
    Users,
}

/// Cached, deduplicated access to every backend entity.
///
/// Writes always follow the same policy: send to the backend, invalidate
/// the entity's cache, then re-read the authoritative record.
pub struct Repository {
    backend: Arc<dyn Backend>,
    courses: QueryCache<Arc<Vec<Course>>>,
    course: QueryCache<Course>,
    sections: QueryCache<Arc<Vec<Section>>>,
    schedules: QueryCache<Arc<Vec<ScheduleSlot>>>,
    users: QueryCache<Arc<Vec<User>>>,
    user: QueryCache<User>,
}

impl Repository {
    pub fn new(backend: Arc<dyn Backend>, ttl: Duration) -> Self {
        Self {
            backend,
            courses: QueryCache::new(ttl),
            course: QueryCache::new(ttl),
            sections: QueryCache::new(ttl),
            schedules: QueryCache::new(ttl),
            users: QueryCache::new(ttl),
            user: QueryCache::new(ttl),
        }
    }

    /// Id of the signed-in user
    pub fn current_user_id(&self) -> Result<u32, ApiError> {
        self.backend.current_user_id()
    }

    // Courses

    pub async fn courses(&self) -> Result<Arc<Vec<Course>>, ApiError> {
        self.courses
            .get_or_fetch(COURSES, || async {
                self.backend.list_courses().await.map(Arc::new)
            })
            .await
    }

    pub async fn course(&self, id: u32) -> Result<Course, ApiError> {
        self.course
            .get_or_fetch(&course_key(id), || self.backend.get_course(id))
            .await
    }

    pub async fn create_course(&self, form: &CourseForm) -> Result<Course, ApiError> {
        let created = self.backend.create_course(form).await?;
        self.invalidate(Entity::Courses);
        info!(course_id = created.id, code = %created.code, "Course created");
        self.course(created.id).await
    }

    pub async fn update_course(&self, id: u32, form: &CourseForm) -> Result<Course, ApiError> {
        self.backend.update_course(id, form).await?;
        self.invalidate(Entity::Courses);
        info!(course_id = id, "Course updated");
        self.course(id).await
    }

    pub async fn delete_course(&self, id: u32) -> Result<(), ApiError> {
        self.backend.delete_course(id).await?;
        self.invalidate(Entity::Courses);
        info!(course_id = id, "Course deleted");
        Ok(())
    }

    // Sections and schedule slots

    pub async fn sections(&self) -> Result<Arc<Vec<Section>>, ApiError> {
        self.sections
            .get_or_fetch(SECTIONS, || async {
                self.backend.list_sections().await.map(Arc::new)
            })
            .await
    }

    pub async fn schedules(&self) -> Result<Arc<Vec<ScheduleSlot>>, ApiError> {
        self.schedules
            .get_or_fetch(SCHEDULES, || async {
                self.backend.list_schedules().await.map(Arc::new)
            })
            .await
    }

    // Users and the signed-in profile

    pub async fn users(&self) -> Result<Arc<Vec<User>>, ApiError> {
        self.users
            .get_or_fetch(USERS, || async {
                self.backend.list_users().await.map(Arc::new)
            })
            .await
    }

    pub async fn user(&self, id: u32) -> Result<User, ApiError> {
        self.user
            .get_or_fetch(&user_key(id), || self.backend.get_user(id))
            .await
    }

    pub async fn profile(&self) -> Result<User, ApiError> {
        let id = self.current_user_id()?;
        self.user(id).await
    }

    pub async fn update_profile(&self, form: &ProfileForm) -> Result<User, ApiError> {
        let id = self.current_user_id()?;
        self.backend.update_user(id, form).await?;
        self.invalidate(Entity::Users);
        info!(user_id = id, "Profile updated");
        self.user(id).await
    }

    pub async fn change_password(&self, form: &PasswordChangeForm) -> Result<(), ApiError> {
        let id = self.current_user_id()?;
        self.backend.change_password(id, form).await?;
        info!(user_id = id, "Password changed");
        Ok(())
    }

    // Invalidation and subscriptions

    pub fn invalidate(&self, entity: Entity) {
        match entity {
            Entity::Courses => {
                self.courses.invalidate_all();
                self.course.invalidate_all();
            }
            Entity::Sections => self.sections.invalidate_all(),
            Entity::Schedules => self.schedules.invalidate_all(),
            Entity::Users => {
                self.users.invalidate_all();
                self.user.invalidate_all();
            }
        }
    }

    /// Drop every cached entity, e.g. on an explicit refresh
    pub fn invalidate_everything(&self) {
        for entity in [Entity::Courses, Entity::Sections, Entity::Schedules, Entity::Users] {
            self.invalidate(entity);
        }
    }

    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            courses: self.courses.len() + self.course.len(),
            sections: self.sections.len(),
            schedules: self.schedules.len(),
            users: self.users.len() + self.user.len(),
        }
    }

    /// Receiver that changes whenever `entity` is invalidated
    pub fn subscribe(&self, entity: Entity) -> watch::Receiver<u64> {
        match entity {
            Entity::Courses => self.courses.subscribe(),
            Entity::Sections => self.sections.subscribe(),
            Entity::Schedules => self.schedules.subscribe(),
            Entity::Users => self.users.subscribe(),
        }
    }
}
