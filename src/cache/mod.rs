//! 缓存层
//!
//! 以插件注册表的方式支持多种后端（Moka 内存缓存 / Redis），
//! 运行时按配置选择，失败时回退到内存缓存。
//! 目前主要用于 JWT -> 用户信息 的热路径查询。

pub mod object_cache;
pub mod register;

use async_trait::async_trait;

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
    /// 命中
    Found(T),
    /// 未命中
    NotFound,
    /// 后端暂时不可用或值无法取出（调用方按未命中处理，不应报错）
    ExistsButNoValue,
}

/// 对象缓存后端统一接口
#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    /// ttl 为 0 时使用后端默认 TTL
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

/// 声明一个缓存后端插件并在程序启动时注册
///
/// 后端类型需要提供 `fn new() -> Result<Self, String>`。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $plugin:ident) => {
        paste::paste! {
            #[ctor::ctor]
            fn [<__register_ $plugin:snake _plugin>]() {
                $crate::cache::register::register_object_cache_plugin(
                    $name,
                    std::sync::Arc::new(|| {
                        Box::pin(async {
                            let cache = $plugin::new().map_err(|e| {
                                $crate::errors::TutorEaseError::cache_connection(e)
                            })?;
                            Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                        }) as $crate::cache::register::BoxedObjectCacheFuture
                    }),
                );
            }
        }
    };
}
