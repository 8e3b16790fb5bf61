// Copyright (c) 2024 NOS Community
// SPDX-License-Identifier: Apache-2.0

//! Adaptive optimization module for dynamic performance tuning.

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;
use spin::Mutex;

use super::core::{
    UnifiedSyscallStats, OptimizationConfig
};

/// 负载级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoadLevel {
    /// 低负载 - 优先考虑能源效率
    Low,
    /// 中负载 - 平衡性能和能源效率
    Medium,
    /// 高负载 - 最大化性能
    High,
}

/// 自适应优化策略类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdaptiveStrategy {
    /// 基于负载的动态调整
    LoadBased,
    /// 基于历史性能的机器学习优化
    MachineLearning,
    /// 基于用户行为的预测优化
    Predictive,
    /// 基于能耗的优化
    EnergyEfficient,
}

/// 负载监控信息
#[derive(Debug, Clone)]
pub struct LoadMonitorInfo {
    pub cpu_usage: f64,
    pub memory_usage: f64,
    pub io_operations: u64,
    pub network_throughput: u64,
    pub syscall_frequency: u64,
    pub timestamp: u64,
}

/// 自适应优化配置
#[derive(Debug, Clone)]
pub struct AdaptiveOptimizationConfig {
    pub enabled: bool,
    pub update_interval_ms: u64,
    pub max_adjustments_per_second: u32,
    pub strategy: AdaptiveStrategy,
    pub sensitivity: f64,
}

impl Default for AdaptiveOptimizationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            update_interval_ms: 500,
            max_adjustments_per_second: 10,
            strategy: AdaptiveStrategy::LoadBased,
            sensitivity: 0.5,
        }
    }
}

/// 自适应优化器
pub struct AdaptiveOptimizer {
    config: AdaptiveOptimizationConfig,
    current_stats: UnifiedSyscallStats,
    load_history: Vec<LoadMonitorInfo>,
    optimization_config: OptimizationConfig,
    last_adjustment_time: u64,
    adjustments_count: u32,
}

impl AdaptiveOptimizer {
    /// 创建新的自适应优化器
    pub fn new(config: AdaptiveOptimizationConfig) -> Self {
        Self {
            config,
            current_stats: UnifiedSyscallStats::new(),
            load_history: Vec::new(),
            optimization_config: OptimizationConfig::default(),
            last_adjustment_time: 0,
            adjustments_count: 0,
        }
    }
    
    /// 更新系统负载信息
    pub fn update_load(&mut self, load_info: LoadMonitorInfo) {
        self.load_history.push(load_info);
        
        // 保持历史记录在合理大小
        if self.load_history.len() > 100 {
            self.load_history.remove(0);
        }
        
        // 根据负载信息调整优化策略
        self.adjust_optimization();
    }
    
    /// 更新系统调用统计信息
    pub fn update_syscall_stats(&mut self, _stats: &UnifiedSyscallStats) {
        // 记录当前统计信息
        // 这里可以实现基于统计信息的优化调整
    }
    
    /// 获取当前优化配置
    pub fn get_optimization_config(&self) -> &OptimizationConfig {
        &self.optimization_config
    }
    
    /// 调整优化策略
    fn adjust_optimization(&mut self) {
        // 检查是否达到调整频率限制
        let current_time = self.get_current_timestamp();
        if current_time - self.last_adjustment_time < 1000 && 
           self.adjustments_count >= self.config.max_adjustments_per_second {
            return;
        }
        
        // 根据选择的策略调整优化配置
        match self.config.strategy {
            AdaptiveStrategy::LoadBased => {
                self.adjust_load_based();
            },
            AdaptiveStrategy::MachineLearning => {
                // 机器学习策略将由更复杂的实现提供
            },
            AdaptiveStrategy::Predictive => {
                // 预测策略将由更复杂的实现提供
            },
            AdaptiveStrategy::EnergyEfficient => {
                // 能耗优化策略将由更复杂的实现提供
            },
        }
        
        // 更新调整计数
        if current_time - self.last_adjustment_time >= 1000 {
            self.last_adjustment_time = current_time;
            self.adjustments_count = 1;
        } else {
            self.adjustments_count += 1;
        }
    }
    
    /// 基于负载的优化调整
    fn adjust_load_based(&mut self) {
        if self.load_history.is_empty() {
            return;
        }
        
        // 获取最近的负载信息
        let recent_load = self.load_history.last().unwrap();
        
        // 确定当前负载级别
        let load_level = self.determine_load_level(recent_load);
        
        // 根据负载级别应用不同的优化策略
        match load_level {
            LoadLevel::Low => {
                // 低负载：优先考虑能源效率
                // 减少或关闭不必要的优化以降低能耗
                self.optimization_config.enable_cache = true; // 缓存仍启用但可能减少大小
                self.optimization_config.enable_batch = false; // 关闭批处理
                self.optimization_config.enable_zero_copy = false; // 关闭零拷贝
                self.optimization_config.fast_path_threshold_ns = 5000; // 提高快速路径阈值
            },
            LoadLevel::Medium => {
                // 中负载：平衡性能和能源效率
                // 启用大部分优化但保持适度配置
                self.optimization_config.enable_cache = true;
                self.optimization_config.enable_batch = true;
                self.optimization_config.enable_zero_copy = true;
                self.optimization_config.fast_path_threshold_ns = 1000; // 默认阈值
            },
            LoadLevel::High => {
                // 高负载：最大化性能
                // 启用所有优化并优化配置以获得最佳性能
                self.optimization_config.enable_cache = true;
                self.optimization_config.enable_batch = true;
                self.optimization_config.enable_zero_copy = true;
                self.optimization_config.fast_path_threshold_ns = 500; // 降低快速路径阈值
            }
        }
    }
    
    /// 确定当前负载级别
    fn determine_load_level(&self, load_info: &LoadMonitorInfo) -> LoadLevel {
        // 基于CPU利用率、内存压力和I/O吞吐量的负载级别判定
        // 可以根据实际情况调整这些阈值
        
        // 高负载条件：CPU>80% 或 内存>90% 或 I/O操作>10000/s
        if load_info.cpu_usage > 80.0 || load_info.memory_usage > 90.0 || load_info.io_operations > 10000 {
            return LoadLevel::High;
        }
        
        // 低负载条件：CPU<30% 且 内存<60% 且 I/O操作<1000/s
        if load_info.cpu_usage < 30.0 && load_info.memory_usage < 60.0 && load_info.io_operations < 1000 {
            return LoadLevel::Low;
        }
        
        // 中负载：介于低负载和高负载之间的情况
        LoadLevel::Medium
    }
    
    /// 获取当前时间戳
    fn get_current_timestamp(&self) -> u64 {
        // This should be implemented with a real time source
        0
    }
}

/// 全局自适应优化器
static GLOBAL_ADAPTIVE_OPTIMIZER: Mutex<Option<AdaptiveOptimizer>> = Mutex::new(None);

/// 初始化全局自适应优化器
pub fn init_global_adaptive_optimizer(config: AdaptiveOptimizationConfig) {
    let mut optimizer_guard = GLOBAL_ADAPTIVE_OPTIMIZER.lock();
    *optimizer_guard = Some(AdaptiveOptimizer::new(config));
}

/// 获取全局自适应优化器
pub fn get_global_adaptive_optimizer() -> Option<&'static Mutex<Option<AdaptiveOptimizer>>> {
    Some(&GLOBAL_ADAPTIVE_OPTIMIZER)
}

/// 更新系统负载信息
pub fn update_system_load(load_info: LoadMonitorInfo) {
    if let Some(optimizer_mutex) = get_global_adaptive_optimizer() {
        let mut guard = optimizer_mutex.lock();
        if let Some(optimizer) = guard.as_mut() {
            optimizer.update_load(load_info);
        }
    }
}

/// 获取当前优化配置的便捷函数
pub fn get_current_optimization_config() -> Option<OptimizationConfig> {
    if let Some(optimizer_mutex) = get_global_adaptive_optimizer() {
        let mut guard = optimizer_mutex.lock();
        if let Some(optimizer) = guard.as_mut() {
            Some(optimizer.optimization_config.clone())
        } else {
            None
        }
    } else {
        None
    }
}

/// 获取当前负载级别估计
pub fn estimate_current_load_level() -> Option<LoadLevel> {
    if let Some(optimizer_mutex) = get_global_adaptive_optimizer() {
        let mut guard = optimizer_mutex.lock();
        if let Some(optimizer) = guard.as_mut() {
            if optimizer.load_history.is_empty() {
                return None;
            }
            let recent_load = optimizer.load_history.last().unwrap();
            Some(optimizer.determine_load_level(recent_load))
        } else {
            None
        }
    } else {
        None
    }
}