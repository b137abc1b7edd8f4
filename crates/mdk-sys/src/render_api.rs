//! Declarations from `RenderAPI.h`.
//!
//! Each struct describes how the SDK should render: either into a context the
//! caller already owns ("foreign context" fields), or by creating its own
//! context with the given creation options. Fill one in, then pass
//! [`RenderApi::as_raw_mut`] to the player's `setRenderAPI`.
//!
//! The structs are plain data. They hold borrowed native handles and never
//! retain or release them.

use std::ffi::{c_char, c_int, c_void};

use ash::vk;

use crate::opaque_type;

// =====================================================================
// Render API kind
// =====================================================================

/// Discriminant stored in the first field of every render API struct.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct MDK_RenderAPI(pub c_int);

impl MDK_RenderAPI {
    pub const Invalid: Self = Self(0);
    pub const OpenGL: Self = Self(1);
    pub const Vulkan: Self = Self(2);
    pub const Metal: Self = Self(3);
    pub const D3D11: Self = Self(4);
}

opaque_type! {
    /// Type-erased render API. Use a concrete struct such as
    /// [`mdkGLRenderAPI`] and cast its pointer to this.
    mdkRenderAPI
}

/// Implemented by every concrete render API struct.
///
/// # Safety
///
/// Implementors must be `#[repr(C)]` with an [`MDK_RenderAPI`] as their first
/// field, so a pointer to them is a valid `mdkRenderAPI*`.
pub unsafe trait RenderApi {
    /// The discriminant stored in `type` by `Default`.
    const KIND: MDK_RenderAPI;

    /// The discriminant currently stored in the struct.
    fn kind(&self) -> MDK_RenderAPI;

    fn as_raw(&self) -> *const mdkRenderAPI {
        (self as *const Self).cast()
    }

    fn as_raw_mut(&mut self) -> *mut mdkRenderAPI {
        (self as *mut Self).cast()
    }
}

// =====================================================================
// OpenGL
// =====================================================================

pub type mdkGLGetProcAddress =
    unsafe extern "C" fn(name: *const c_char, opaque: *mut c_void) -> *mut c_void;
pub type mdkGLGetCurrentNativeContext = unsafe extern "C" fn(opaque: *mut c_void) -> *mut c_void;

/// OpenGL / OpenGL ES render API.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct mdkGLRenderAPI {
    pub type_: MDK_RenderAPI,
    /// If `>= 0`, draw into this FBO. The caller does not need to bind it.
    pub fbo: c_int,
    pub unused: c_int,
    /// Not implemented by the SDK yet.
    pub getProcAddress: Option<mdkGLGetProcAddress>,
    /// Not implemented by the SDK yet.
    pub getCurrentNativeContext: Option<mdkGLGetCurrentNativeContext>,
    pub opaque: *mut c_void,

    pub debug: bool,
    /// -1: auto, 0: no, 1: yes.
    pub egl: i8,
    /// -1: auto, 0: no, 1: yes. If one of `opengl`/`opengles` is 0 the other is treated as 1.
    pub opengl: i8,
    /// -1: auto, 0: no, 1: yes.
    pub opengles: i8,
    /// 0: no profile, 1: core, 2: compatibility.
    pub profile: u8,
    /// Requested `major.minor`, ignored if below 2.0.
    pub version: f32,
    pub reserved: [i8; 32],
}

impl Default for mdkGLRenderAPI {
    fn default() -> Self {
        Self {
            type_: MDK_RenderAPI::OpenGL,
            fbo: -1,
            unused: 0,
            getProcAddress: None,
            getCurrentNativeContext: None,
            opaque: std::ptr::null_mut(),
            debug: false,
            egl: -1,
            opengl: -1,
            opengles: -1,
            profile: 3,
            version: 0.0,
            reserved: [0; 32],
        }
    }
}

unsafe impl RenderApi for mdkGLRenderAPI {
    const KIND: MDK_RenderAPI = MDK_RenderAPI::OpenGL;

    fn kind(&self) -> MDK_RenderAPI {
        self.type_
    }
}

// =====================================================================
// Metal
// =====================================================================

pub type mdkMetalCurrentRenderTarget = unsafe extern "C" fn(opaque: *mut c_void) -> *mut c_void;

/// Metal render API. Objective-C ids are stored as untyped pointers.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct mdkMetalRenderAPI {
    pub type_: MDK_RenderAPI,
    /// `id<MTLDevice>`. Must be set when the caller provides the Metal context.
    pub device: *mut c_void,
    /// `id<MTLCommandQueue>`, optional. If set, `device` may be null.
    pub cmdQueue: *mut c_void,
    /// `id<MTLTexture>` render target for offscreen rendering.
    pub texture: *mut c_void,
    pub opaque: *mut c_void,
    /// Returns the current `id<MTLTexture>` for on-screen rendering.
    pub currentRenderTarget: Option<mdkMetalCurrentRenderTarget>,
    pub reserved: [*mut c_void; 2],

    /// macOS only. -1 selects the system default device.
    pub device_index: c_int,
}

impl Default for mdkMetalRenderAPI {
    fn default() -> Self {
        Self {
            type_: MDK_RenderAPI::Metal,
            device: std::ptr::null_mut(),
            cmdQueue: std::ptr::null_mut(),
            texture: std::ptr::null_mut(),
            opaque: std::ptr::null_mut(),
            currentRenderTarget: None,
            reserved: [std::ptr::null_mut(); 2],
            device_index: -1,
        }
    }
}

unsafe impl RenderApi for mdkMetalRenderAPI {
    const KIND: MDK_RenderAPI = MDK_RenderAPI::Metal;

    fn kind(&self) -> MDK_RenderAPI {
        self.type_
    }
}

#[cfg(target_os = "macos")]
mod metal_handles {
    use super::mdkMetalRenderAPI;
    use objc2::runtime::ProtocolObject;
    use objc2_metal::{MTLCommandQueue, MTLDevice, MTLTexture};
    use std::ffi::c_void;

    fn id_ptr<T: ?Sized>(object: &ProtocolObject<T>) -> *mut c_void {
        std::ptr::from_ref(object).cast_mut().cast()
    }

    impl mdkMetalRenderAPI {
        /// Borrow `device`. It must outlive every use of this struct by the SDK.
        pub fn set_device(&mut self, device: &ProtocolObject<dyn MTLDevice>) {
            self.device = id_ptr(device);
        }

        /// Borrow `queue`. It must outlive every use of this struct by the SDK.
        pub fn set_command_queue(&mut self, queue: &ProtocolObject<dyn MTLCommandQueue>) {
            self.cmdQueue = id_ptr(queue);
        }

        /// Borrow `texture` as the offscreen render target.
        pub fn set_texture(&mut self, texture: &ProtocolObject<dyn MTLTexture>) {
            self.texture = id_ptr(texture);
        }
    }
}

// =====================================================================
// D3D11
// =====================================================================

#[cfg(target_os = "windows")]
pub use d3d11::mdkD3D11RenderAPI;

#[cfg(target_os = "windows")]
mod d3d11 {
    use super::{MDK_RenderAPI, RenderApi};
    use std::ffi::c_void;
    use std::mem::ManuallyDrop;
    use windows::core::Interface;
    use windows::Win32::Graphics::Direct3D11::{
        ID3D11DeviceChild, ID3D11DeviceContext, ID3D11RenderTargetView, ID3D11Texture2D,
    };

    /// D3D11 render API.
    ///
    /// COM pointers are borrowed: the struct never calls `AddRef` or `Release`.
    #[repr(C)]
    #[derive(Debug)]
    pub struct mdkD3D11RenderAPI {
        pub type_: MDK_RenderAPI,
        /// Foreign context. Not needed when `rtv` is set.
        pub context: ManuallyDrop<Option<ID3D11DeviceContext>>,
        /// `ID3D11RenderTargetView` or `ID3D11Texture2D` to render into.
        pub rtv: ManuallyDrop<Option<ID3D11DeviceChild>>,
        pub reserved: [*mut c_void; 2],

        pub debug: bool,
        /// Swap chain buffers. UWP requires at least 2.
        pub buffers: i32,
        /// Adapter index.
        pub adapter: i32,
        /// 0 is the highest available.
        pub feature_level: f32,
    }

    impl Default for mdkD3D11RenderAPI {
        fn default() -> Self {
            Self {
                type_: MDK_RenderAPI::D3D11,
                context: ManuallyDrop::new(None),
                rtv: ManuallyDrop::new(None),
                reserved: [std::ptr::null_mut(); 2],
                debug: false,
                buffers: 0,
                adapter: 0,
                feature_level: 0.0,
            }
        }
    }

    fn borrow_child(raw: *mut c_void) -> ManuallyDrop<Option<ID3D11DeviceChild>> {
        // Both accepted interfaces derive from ID3D11DeviceChild.
        ManuallyDrop::new(Some(unsafe { ID3D11DeviceChild::from_raw(raw) }))
    }

    impl mdkD3D11RenderAPI {
        /// Borrow `context`. It must outlive every use of this struct by the SDK.
        pub fn set_context(&mut self, context: &ID3D11DeviceContext) {
            self.context = ManuallyDrop::new(Some(unsafe { ID3D11DeviceContext::from_raw(context.as_raw()) }));
        }

        pub fn set_render_target_view(&mut self, rtv: &ID3D11RenderTargetView) {
            self.rtv = borrow_child(rtv.as_raw());
        }

        pub fn set_texture(&mut self, texture: &ID3D11Texture2D) {
            self.rtv = borrow_child(texture.as_raw());
        }
    }

    unsafe impl RenderApi for mdkD3D11RenderAPI {
        const KIND: MDK_RenderAPI = MDK_RenderAPI::D3D11;

        fn kind(&self) -> MDK_RenderAPI {
            self.type_
        }
    }
}

// =====================================================================
// Vulkan
// =====================================================================

/// Returns the render target image count and writes its size.
pub type mdkVkRenderTargetSize =
    unsafe extern "C" fn(opaque: *mut c_void, w: *mut c_int, h: *mut c_int) -> c_int;
/// Returns the image index. Must be paired with [`mdkVkEndFrame`].
pub type mdkVkBeginFrame = unsafe extern "C" fn(
    opaque: *mut c_void,
    view: *mut vk::ImageView,
    fb: *mut vk::Framebuffer,
    img_sem: *mut vk::Semaphore,
) -> c_int;
pub type mdkVkCurrentCommandBuffer = unsafe extern "C" fn(opaque: *mut c_void) -> vk::CommandBuffer;
pub type mdkVkEndFrame = unsafe extern "C" fn(opaque: *mut c_void, draw_sem: *mut vk::Semaphore);

/// Vulkan render API.
///
/// The C header only declares the handle fields when Vulkan headers are
/// included first. Handle types are always available here, so this is the
/// full layout.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct mdkVulkanRenderAPI {
    pub type_: MDK_RenderAPI,

    /// Shared instance, used to load instance extensions for an internal context.
    pub instance: vk::Instance,
    /// Required for a foreign context.
    pub phy_device: vk::PhysicalDevice,
    /// Required for a foreign context.
    pub device: vk::Device,
    /// If null, `gfx_queue_index` is used.
    pub graphics_queue: vk::Queue,
    /// Offscreen render target.
    pub rtv: *mut vk::ImageView,
    pub render_pass: vk::RenderPass,
    pub opaque: *mut c_void,
    pub renderTargetSize: Option<mdkVkRenderTargetSize>,
    pub beginFrame: Option<mdkVkBeginFrame>,
    /// If null, a command pool is created internally.
    pub currentCommandBuffer: Option<mdkVkCurrentCommandBuffer>,
    pub endFrame: Option<mdkVkEndFrame>,
    pub reserved: [*mut c_void; 2],

    /// Required if graphics and transfer families differ.
    pub graphics_family: c_int,
    pub compute_family: c_int,
    pub transfer_family: c_int,
    pub present_family: c_int,

    pub debug: bool,
    /// 2 for double buffering.
    pub buffers: u8,
    pub device_index: c_int,
    /// Requires Vulkan 1.1.
    pub max_version: u32,
    pub gfx_queue_index: c_int,
    pub transfer_queue_index: c_int,
    pub compute_queue_index: c_int,

    pub depth: c_int,
    pub reserved_opt: [u8; 32],
}

impl Default for mdkVulkanRenderAPI {
    fn default() -> Self {
        Self {
            type_: MDK_RenderAPI::Vulkan,
            instance: vk::Instance::null(),
            phy_device: vk::PhysicalDevice::null(),
            device: vk::Device::null(),
            graphics_queue: vk::Queue::null(),
            rtv: std::ptr::null_mut(),
            render_pass: vk::RenderPass::null(),
            opaque: std::ptr::null_mut(),
            renderTargetSize: None,
            beginFrame: None,
            currentCommandBuffer: None,
            endFrame: None,
            reserved: [std::ptr::null_mut(); 2],
            graphics_family: -1,
            compute_family: -1,
            transfer_family: -1,
            present_family: -1,
            debug: false,
            buffers: 2,
            device_index: -1,
            max_version: 0,
            gfx_queue_index: 0,
            transfer_queue_index: -1,
            compute_queue_index: -1,
            depth: 8,
            reserved_opt: [0; 32],
        }
    }
}

unsafe impl RenderApi for mdkVulkanRenderAPI {
    const KIND: MDK_RenderAPI = MDK_RenderAPI::Vulkan;

    fn kind(&self) -> MDK_RenderAPI {
        self.type_
    }
}
