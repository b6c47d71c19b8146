use tracing::debug;

use super::descriptor::{ModuleDescriptor, collect_descendants};
use crate::errors::Result;
use crate::models::student_modules::entities::{ModuleType, StudentModule};
use crate::models::users::entities::RequestUser;
use crate::storage::Storage;

/// 单次查询的状态键数量上限（SQLite 对参数个数有限制）
pub const STUDENT_MODULE_CHUNK_SIZE: usize = 500;

/// 某个学生的学生模块缓存
///
/// 构造时一次性批量读取内容树需要的所有学生模块，之后按 (course, type, key) 在内存中查找。
/// 只有 `stores_state()` 为真或声明了共享状态键的模块才会有对应记录。
#[derive(Debug, Clone, Default)]
pub struct StudentModuleCache {
    cache: Vec<StudentModule>,
}

impl StudentModuleCache {
    /// 为 `descriptors` 预取学生模块
    ///
    /// 匿名用户得到空缓存且不访问存储。`lock_for_update` 为真时读取会加行锁，
    /// 锁持续到外层事务结束。
    pub async fn new<D: ModuleDescriptor>(
        storage: &dyn Storage,
        course_id: &str,
        user: &RequestUser,
        descriptors: &[&D],
        lock_for_update: bool,
    ) -> Result<Self> {
        let Some(student_id) = user.id() else {
            return Ok(Self::default());
        };

        let state_keys = Self::module_state_keys(descriptors);
        let mut cache = Vec::new();
        let mut chunks = 0;
        for chunk in state_keys.chunks(STUDENT_MODULE_CHUNK_SIZE) {
            cache.extend(
                storage
                    .find_student_modules(course_id, student_id, chunk, lock_for_update)
                    .await?,
            );
            chunks += 1;
        }

        debug!(
            "Loaded {} student modules for {} state keys in {} queries (course: {}, student: {} {})",
            cache.len(),
            state_keys.len(),
            chunks,
            course_id,
            student_id,
            user.username().unwrap_or_default()
        );

        Ok(Self { cache })
    }

    /// 遍历 `descriptor` 及其后代后预取学生模块
    ///
    /// `depth` 为在 `descriptor` 之外额外加载的层数，None 表示全部后代。
    /// `filter` 决定节点是否参与缓存，被排除的节点的子节点仍会被遍历。
    pub async fn for_descriptor_descendants<D, F>(
        storage: &dyn Storage,
        course_id: &str,
        user: &RequestUser,
        descriptor: &D,
        depth: Option<usize>,
        filter: F,
        lock_for_update: bool,
    ) -> Result<Self>
    where
        D: ModuleDescriptor,
        F: Fn(&D) -> bool,
    {
        let descriptors = collect_descendants(descriptor, depth, filter);
        Self::new(storage, course_id, user, &descriptors, lock_for_update).await
    }

    /// 收集需要读取的状态键，允许重复
    fn module_state_keys<D: ModuleDescriptor>(descriptors: &[&D]) -> Vec<String> {
        let mut keys = Vec::new();
        for descriptor in descriptors {
            if descriptor.stores_state() {
                keys.push(descriptor.location_url());
            }

            if let Some(shared_state_key) = descriptor.shared_state_key() {
                keys.push(shared_state_key.to_string());
            }
        }
        keys
    }

    /// 按 (course, type, key) 查找，返回第一个匹配项
    pub fn lookup(
        &self,
        course_id: &str,
        module_type: ModuleType,
        module_state_key: &str,
    ) -> Option<&StudentModule> {
        self.cache.iter().find(|m| {
            m.course_id == course_id
                && m.module_type == module_type
                && m.module_state_key == module_state_key
        })
    }

    /// 加入刚创建的学生模块，使后续查找可见
    pub fn append(&mut self, student_module: StudentModule) {
        self.cache.push(student_module);
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StudentModule> {
        self.cache.iter()
    }
}
