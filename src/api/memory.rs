use crate::api::client::Backend;
use crate::core::error::ApiError;
use crate::models::course::{Course, CourseForm};
use crate::models::schedule::ScheduleSlot;
use crate::models::section::Section;
use crate::models::user::{PasswordChangeForm, ProfileForm, User};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

#[derive(Default)]
struct Data {
    courses: Vec<Course>,
    sections: Vec<Section>,
    schedules: Vec<ScheduleSlot>,
    users: Vec<User>,
    passwords: HashMap<u32, String>,
    failing: Option<ApiError>,
}

/// Backend kept entirely in memory.
///
/// Behaves like the real API for every operation the dashboard uses and
/// counts list calls, so cache behaviour can be observed.
pub struct InMemoryBackend {
    data: Mutex<Data>,
    user_id: Option<u32>,
    latency: Duration,
    list_calls: AtomicUsize,
}

impl InMemoryBackend {
    pub fn new(user_id: Option<u32>) -> Self {
        Self {
            data: Mutex::new(Data::default()),
            user_id,
            latency: Duration::ZERO,
            list_calls: AtomicUsize::new(0),
        }
    }

    /// Delay every call, to widen race windows in tests
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_courses(self, courses: Vec<Course>) -> Self {
        self.lock().courses = courses;
        self
    }

    pub fn with_sections(self, sections: Vec<Section>) -> Self {
        self.lock().sections = sections;
        self
    }

    pub fn with_schedules(self, schedules: Vec<ScheduleSlot>) -> Self {
        self.lock().schedules = schedules;
        self
    }

    pub fn with_users(self, users: Vec<User>) -> Self {
        self.lock().users = users;
        self
    }

    pub fn with_password(self, user_id: u32, password: &str) -> Self {
        self.lock().passwords.insert(user_id, password.to_string());
        self
    }

    /// Make every subsequent call fail with `error`; `None` restores service
    pub fn set_failure(&self, error: Option<ApiError>) {
        self.lock().failing = error;
    }

    /// Number of list operations served so far
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Replace a course behind the dashboard's back, as another session would
    pub fn put_course(&self, course: Course) {
        let mut data = self.lock();
        match data.courses.iter_mut().find(|c| c.id == course.id) {
            Some(existing) => *existing = course,
            None => data.courses.push(course),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Data> {
        // A poisoned lock only means a test panicked mid-call
        self.data.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn enter(&self, is_list: bool) -> Result<(), ApiError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if is_list {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
        }
        match &self.lock().failing {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

fn not_found(what: &str, id: u32) -> ApiError {
    ApiError::Http {
        status: 404,
        message: format!("{} {} no existe", what, id),
    }
}

#[async_trait]
impl Backend for InMemoryBackend {
    async fn list_courses(&self) -> Result<Vec<Course>, ApiError> {
        self.enter(true).await?;
        Ok(self.lock().courses.clone())
    }

    async fn get_course(&self, id: u32) -> Result<Course, ApiError> {
        self.enter(false).await?;
        self.lock()
            .courses
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| not_found("Curso", id))
    }

    async fn create_course(&self, form: &CourseForm) -> Result<Course, ApiError> {
        self.enter(false).await?;
        let mut data = self.lock();
        if data.courses.iter().any(|c| c.code == form.code) {
            return Err(ApiError::Http {
                status: 409,
                message: format!("El código {} ya existe", form.code),
            });
        }
        let id = data.courses.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let course = Course {
            id,
            code: form.code.clone(),
            name: form.name.clone(),
            credits: form.credits.clamp(0, u8::MAX as i64) as u8,
            description: form.description.clone(),
        };
        data.courses.push(course.clone());
        Ok(course)
    }

    async fn update_course(&self, id: u32, form: &CourseForm) -> Result<(), ApiError> {
        self.enter(false).await?;
        let mut data = self.lock();
        let course = data
            .courses
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found("Curso", id))?;
        course.code = form.code.clone();
        course.name = form.name.clone();
        course.credits = form.credits.clamp(0, u8::MAX as i64) as u8;
        course.description = form.description.clone();
        Ok(())
    }

    async fn delete_course(&self, id: u32) -> Result<(), ApiError> {
        self.enter(false).await?;
        let mut data = self.lock();
        let before = data.courses.len();
        data.courses.retain(|c| c.id != id);
        if data.courses.len() == before {
            return Err(not_found("Curso", id));
        }
        Ok(())
    }

    async fn list_sections(&self) -> Result<Vec<Section>, ApiError> {
        self.enter(true).await?;
        Ok(self.lock().sections.clone())
    }

    async fn list_schedules(&self) -> Result<Vec<ScheduleSlot>, ApiError> {
        self.enter(true).await?;
        Ok(self.lock().schedules.clone())
    }

    async fn get_user(&self, id: u32) -> Result<User, ApiError> {
        self.enter(false).await?;
        self.lock()
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| not_found("Usuario", id))
    }

    async fn update_user(&self, id: u32, form: &ProfileForm) -> Result<(), ApiError> {
        self.enter(false).await?;
        let mut data = self.lock();
        let user = data
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| not_found("Usuario", id))?;
        user.first_name = form.first_name.clone();
        user.last_name1 = form.last_name1.clone();
        user.last_name2 = form.last_name2.clone();
        user.identification = form.identification.clone();
        user.program = form.program.clone();
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.enter(true).await?;
        Ok(self.lock().users.clone())
    }

    async fn change_password(&self, id: u32, form: &PasswordChangeForm) -> Result<(), ApiError> {
        self.enter(false).await?;
        let mut data = self.lock();
        match data.passwords.get(&id) {
            Some(current) if *current == form.current_password => {
                data.passwords.insert(id, form.new_password.clone());
                Ok(())
            }
            _ => Err(ApiError::Rejected("La contraseña actual es incorrecta".to_string())),
        }
    }

    fn current_user_id(&self) -> Result<u32, ApiError> {
        self.user_id
            .ok_or_else(|| ApiError::MissingCredentials("no user id".to_string()))
    }
}
