// Usage guides served by the documentation-only tools

pub const UI_GUIDE: &str = "\
Supported actions: click, double click, long press, slow swipe, fling, drag, text input, key event

Command format: hdc shell uitest uiInput <action> <arguments>

1. click - single tap
   Arguments: point_x (required), point_y (required)
   Example: hdc shell uitest uiInput click 100 100

2. doubleClick - double tap
   Arguments: point_x (required), point_y (required)
   Example: hdc shell uitest uiInput doubleClick 100 100

3. longClick - long press
   Arguments: point_x (required), point_y (required)
   Example: hdc shell uitest uiInput longClick 100 100

4. fling - fast swipe
   Arguments: from_x, from_y, to_x, to_y (required), swipeVelocityPps_ (optional, 200-40000 px/s, default 600), stepLength (optional, default distance/50 px)
   Example: hdc shell uitest uiInput fling 400 400 400 1600 20000

5. swipe - slow swipe
   Arguments: from_x, from_y, to_x, to_y (required), swipeVelocityPps_ (optional, 200-40000 px/s, default 600)
   Example: hdc shell uitest uiInput swipe 10 10 200 200 500

6. drag - drag
   Arguments: from_x, from_y, to_x, to_y (required), swipeVelocityPps_ (optional, 200-40000 px/s, default 600)
   Example: hdc shell uitest uiInput drag 10 10 100 100 500

7. dircFling - directional fling
   Arguments: direction (optional, 0 left, 1 right, 2 up, 3 down, default 0), swipeVelocityPps_ (optional), stepLength (optional)
   Examples:
   - left:  hdc shell uitest uiInput dircFling 0 500
   - right: hdc shell uitest uiInput dircFling 1 600
   - up:    hdc shell uitest uiInput dircFling 2
   - down:  hdc shell uitest uiInput dircFling 3

8. inputText - type into an input field
   Arguments: point_x (required), point_y (required), text
   Example: hdc shell uitest uiInput inputText 100 100 hello

9. keyEvent - hardware key event
   Arguments: keyID (required), keyID2 (optional, for combinations)
   Examples:
   - home:  hdc shell uitest uiInput keyEvent Home
   - back:  hdc shell uitest uiInput keyEvent Back
   - paste: hdc shell uitest uiInput keyEvent 2072 2038

Key codes: https://docs.openharmony.cn/pages/v4.1/en/application-dev/reference/apis-input-kit/js-apis-keycode.md";

pub const AA_GUIDE: &str = "\
aa (ability assistant) usage

- start: start an ability
  hdc shell aa start -a {abilityName} -b {bundleName}

- stop-service: stop a service
  hdc shell aa stop-service

- force-stop: force an application to exit
  hdc shell aa force-stop {bundleName}

- test: run unit tests
  hdc shell aa test -b <bundle-name> -p <package-name> -m <module-name> -r <test-runner> -u <user-id>

- attach: attach the debugger
  hdc shell aa attach

- detach: detach the debugger
  hdc shell aa detach

- appdebug: start an application for debugging
  hdc shell aa appdebug -b <bundle-name> -p <process-name> --start --gdb";

pub const BM_GUIDE: &str = "\
bm (bundle manager) usage

- install: install an application
  hdc shell bm install -p <path> -u <user-id> -r <flags>

- uninstall: uninstall an application
  hdc shell bm uninstall -n <bundle-name> -k

- dump: dump application info
  hdc shell bm dump -n <bundle-name>

- clean: clear application data
  hdc shell bm clean -n <bundle-name> -c <cache|data>

- enable: enable an application
  hdc shell bm enable -n <bundle-name>

- disable: disable an application
  hdc shell bm disable -n <bundle-name>

- get: query information
  hdc shell bm get --udid";

pub const PARAM_GUIDE: &str = "\
param usage

Device information keys

- const.product.name: device name
- const.product.brand: brand
- const.product.model: model
- const.product.software.version: system version
- const.ohos.apiversion: API level
- const.product.cpu.abilist: CPU architecture

Example: hdc shell param get const.product.name";

pub const HIDUMPER_GUIDE: &str = "\
hidumper usage

System service information

- RenderService: rendering service (includes screen info)
- DisplayManagerService: display management
- PowerManagerService: power management
- BatteryService: battery
- NetConnManager: network connections
- MemoryManagerService: memory management
- StorageManager: storage

Example: hdc shell hidumper -s RenderService -a screen";
